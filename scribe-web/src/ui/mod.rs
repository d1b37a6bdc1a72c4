//! Server-rendered HTML
//!
//! Pages are composed from `format!` templates behind a shared layout;
//! static assets are embedded at compile time and served with explicit
//! content types. Everything interpolated from the database or the request
//! goes through [`escape_html`].

use scribe_common::config::WebConfig;
use scribe_common::db::models::User;

mod pages;

pub use pages::*;

/// Embedded stylesheet, served at /static/scribe.css
pub const STYLESHEET: &str = include_str!("assets/scribe.css");

/// Embedded demo recorder script, served at /static/demo.js
pub const DEMO_JS: &str = include_str!("assets/demo.js");

/// Escape text for interpolation into HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Shared page layout: header, navigation, flash notice, analytics snippet
pub fn layout(
    config: &WebConfig,
    title: &str,
    viewer: Option<&User>,
    flash: Option<&str>,
    body: &str,
) -> String {
    let identity = match viewer {
        Some(user) => format!(
            r#"<span class="identity">{}</span> <a href="/logout">Sign out</a>"#,
            escape_html(&user.email)
        ),
        None => r#"<a href="/login/google">Sign in with Google</a>"#.to_string(),
    };

    let flash_bar = match flash {
        Some(message) => format!(r#"<div class="flash">{}</div>"#, escape_html(message)),
        None => String::new(),
    };

    let analytics = match &config.ga_tracking_id {
        Some(tracking_id) => format!(
            r#"<script>
      window.dataLayer = window.dataLayer || [];
      function gtag() {{ dataLayer.push(arguments); }}
      gtag('js', new Date());
      gtag('config', '{}');
    </script>
    <script async src="https://www.googletagmanager.com/gtag/js?id={}"></script>"#,
            escape_html(tracking_id),
            escape_html(tracking_id)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Scribe</title>
    <link rel="stylesheet" href="/static/scribe.css">
    {analytics}
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1><a href="/">Scribe</a></h1>
                <p class="subtitle">crowdsourced speech transcription</p>
            </div>
            <nav class="header-right">
                <a href="/demo">Demo</a>
                <a href="/documentation">Documentation</a>
                <a href="/worker-types">Worker types</a>
                {identity}
            </nav>
        </div>
    </header>
    {flash_bar}
    <main class="container">
{body}
    </main>
</body>
</html>"#,
        title = escape_html(title),
        analytics = analytics,
        identity = identity,
        flash_bar = flash_bar,
        body = body,
    )
}

fn error_document(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title} - Scribe</title>
    <link rel="stylesheet" href="/static/scribe.css">
</head>
<body>
    <main class="container error-page">
        <h2>{title}</h2>
        <p>{message}</p>
        <p><a href="/">Back to the front page</a></p>
    </main>
</body>
</html>"#,
        title = title,
        message = message,
    )
}

/// Static 403 page
pub fn forbidden_page() -> String {
    error_document("Forbidden", "You are not allowed to access this page.")
}

/// Static 404 page
pub fn not_found_page() -> String {
    error_document("Page not found", "The page you were looking for does not exist.")
}

/// Static 400 page
pub fn bad_request_page() -> String {
    error_document("Bad request", "The request could not be understood.")
}

/// Static 500 page
pub fn internal_error_page() -> String {
    error_document(
        "Something went wrong",
        "An internal error occurred. Please try again later.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> WebConfig {
        WebConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            public_url: "http://localhost:8000".to_string(),
            database_path: ":memory:".to_string(),
            google_client_id: "id".to_string(),
            google_client_secret: "secret".to_string(),
            api_url: "https://api.example.org".to_string(),
            ga_tracking_id: None,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_layout_anonymous_shows_login_link() {
        let html = layout(&test_config(), "Home", None, None, "<p>body</p>");
        assert!(html.contains("/login/google"));
        assert!(!html.contains("Sign out"));
        assert!(!html.contains("googletagmanager"));
    }

    #[test]
    fn test_layout_signed_in_shows_email_and_logout() {
        let user = User {
            id: "subject-1".to_string(),
            email: "admin@example.org".to_string(),
            admin: true,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let html = layout(&test_config(), "Home", Some(&user), None, "");
        assert!(html.contains("admin@example.org"));
        assert!(html.contains("/logout"));
        assert!(!html.contains("/login/google"));
    }

    #[test]
    fn test_layout_flash_is_escaped() {
        let html = layout(
            &test_config(),
            "Home",
            None,
            Some("<b>saved</b>"),
            "",
        );
        assert!(html.contains("&lt;b&gt;saved&lt;/b&gt;"));
    }

    #[test]
    fn test_layout_analytics_snippet_present_when_configured() {
        let mut config = test_config();
        config.ga_tracking_id = Some("UA-12345-6".to_string());
        let html = layout(&config, "Home", None, None, "");
        assert!(html.contains("UA-12345-6"));
        assert!(html.contains("googletagmanager"));
    }
}
