#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Greeting {
    Success(String),
    Warning(String),
}

pub fn greet(name: &str) -> Greeting {
    let name = name.trim();
    if name.is_empty() {
        return Greeting::Warning("Please enter your name.".to_string());
    }
    Greeting::Success(format!("Hello world, {name}!"))
}
