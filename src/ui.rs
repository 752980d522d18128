use crate::greeting::Greeting;
use crate::models::BackdropResponse;
use std::time::Duration;

pub fn render_index(
    backdrop: &BackdropResponse,
    greeting: Option<&Greeting>,
    poll_every: Duration,
) -> String {
    let url = backdrop.url.as_deref().unwrap_or("");
    let warning = backdrop.warning.as_deref().unwrap_or("");
    let (notice_type, notice) = match greeting {
        Some(Greeting::Success(message)) => ("ok", message.as_str()),
        Some(Greeting::Warning(message)) => ("warn", message.as_str()),
        None => ("", ""),
    };

    INDEX_HTML
        .replace("{{POLL_MS}}", &poll_every.as_millis().max(1).to_string())
        .replace("{{BACKDROP_URL}}", &escape_html(url))
        .replace("{{WARNING}}", &escape_html(warning))
        .replace("{{NOTICE_TYPE}}", notice_type)
        .replace("{{NOTICE}}", &escape_html(notice))
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Hello World Backdrop</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --ink: #1f1d1b;
      --accent: #ff6b4a;
      --card: rgba(255, 255, 255, 0.6);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.25);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background-color: #f8f3e6;
      background-size: cover;
      background-repeat: no-repeat;
      background-attachment: fixed;
      background-position: center center;
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
      transition: background-image 400ms ease;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      backdrop-filter: blur(6px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 22px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
      text-shadow: 1px 1px 2px rgba(255, 255, 255, 0.8);
    }

    form {
      display: grid;
      gap: 12px;
    }

    label {
      font-weight: 500;
    }

    input {
      border: 1px solid rgba(0, 0, 0, 0.15);
      border-radius: 14px;
      padding: 12px 14px;
      font-size: 1rem;
      font-family: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .notice {
      border-radius: 14px;
      padding: 12px 14px;
      font-weight: 500;
    }

    .notice:empty {
      display: none;
    }

    .notice[data-type="ok"] {
      background: rgba(45, 122, 75, 0.15);
      color: #2d7a4b;
    }

    .notice[data-type="warn"] {
      background: rgba(198, 140, 43, 0.18);
      color: #8a5a12;
    }
  </style>
</head>
<body data-backdrop="{{BACKDROP_URL}}">
  <main class="app">
    <h1>Enter your name, get a hello world</h1>
    <form method="post" action="/greet">
      <label for="name">Your name</label>
      <input id="name" name="name" type="text" autocomplete="name" />
      <button type="submit">Enter</button>
    </form>
    <div class="notice" id="notice" data-type="{{NOTICE_TYPE}}">{{NOTICE}}</div>
    <div class="notice" id="warning" data-type="warn">{{WARNING}}</div>
  </main>
  <script>
    const warningEl = document.getElementById('warning');
    let currentUrl = '';

    const applyBackdrop = (url) => {
      if (!url || url === currentUrl) {
        return;
      }
      currentUrl = url;
      document.body.style.backgroundImage = `url(${JSON.stringify(url)})`;
    };

    const poll = async () => {
      try {
        const res = await fetch('/api/backdrop');
        if (!res.ok) {
          return;
        }
        const data = await res.json();
        applyBackdrop(data.url);
        warningEl.textContent = data.warning || '';
      } catch (err) {
        warningEl.textContent = err.message;
      }
    };

    applyBackdrop(document.body.dataset.backdrop);
    setInterval(poll, {{POLL_MS}});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_carries_backdrop_and_warning() {
        let backdrop = BackdropResponse {
            url: Some("https://images.dog.ceo/breeds/pug/1.jpg".to_string()),
            last_refresh_at: None,
            warning: Some("provider returned HTTP 503".to_string()),
        };
        let html = render_index(&backdrop, None, Duration::from_secs(1));
        assert!(html.contains(r#"data-backdrop="https://images.dog.ceo/breeds/pug/1.jpg""#));
        assert!(html.contains("provider returned HTTP 503"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn greeting_is_escaped() {
        let greeting = Greeting::Success("Hello world, <b>Ada</b>!".to_string());
        let html = render_index(
            &BackdropResponse::default(),
            Some(&greeting),
            Duration::from_secs(1),
        );
        assert!(html.contains(r#"data-type="ok">Hello world, &lt;b&gt;Ada&lt;/b&gt;!"#));
    }

    #[test]
    fn client_poll_follows_configured_tick() {
        let html = render_index(&BackdropResponse::default(), None, Duration::from_millis(250));
        assert!(html.contains("setInterval(poll, 250);"));
        assert!(!html.contains("setInterval(poll, 1000);"));
    }

    #[test]
    fn escape_covers_attribute_quotes() {
        assert_eq!(escape_html(r#"a"b'c&d"#), "a&quot;b&#39;c&amp;d");
    }
}
