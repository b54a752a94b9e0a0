//! Shared page chrome and HTML escaping

/// Escape text for safe inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PAGE_STYLE: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }
        header {
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
            margin-bottom: 30px;
        }
        .header-content {
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        .header-right {
            text-align: right;
            font-size: 14px;
            color: #888;
            font-family: 'Courier New', monospace;
            line-height: 1.2;
        }
        h1 {
            font-size: 26px;
            color: #4a9eff;
        }
        h2 {
            color: #4a9eff;
            margin: 20px 0 10px;
        }
        .subtitle {
            color: #888;
            font-size: 16px;
        }
        .content {
            padding: 0 20px 40px;
        }
        .button {
            display: inline-block;
            padding: 10px 20px;
            background: #4a9eff;
            color: white;
            text-decoration: none;
            border: none;
            border-radius: 4px;
            margin: 10px 5px 10px 0;
            font-weight: 600;
            cursor: pointer;
        }
        .button:hover {
            background: #3a8eef;
        }
        table.data {
            border-collapse: collapse;
            margin-top: 10px;
        }
        table.data th, table.data td {
            border: 1px solid #3a3a3a;
            padding: 6px 12px;
            text-align: left;
        }
        table.data thead th {
            background: #2a2a2a;
            color: #4a9eff;
        }
        ul.columns {
            margin-left: 20px;
        }
"#;

/// Wrap page body HTML in the common document and header
pub fn render_page(title: &str, subtitle: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1>{title}</h1>
                <p class="subtitle">{subtitle}</p>
            </div>
            <div class="header-right">
                <div>sentiscope v{version}</div>
                <div>{git_hash} ({profile})</div>
            </div>
        </div>
    </header>
    <div class="content">
{body}
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        subtitle = escape_html(subtitle),
        style = PAGE_STYLE,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        profile = env!("BUILD_PROFILE"),
        body = body,
    )
}
