//! Browser preview page.

use crate::render::svg::{escape, to_svg};
use crate::render::tree::Page;

/// A standalone HTML page showing the rendered resume at A4 width.
pub fn preview_page(page: &Page, full_name: &str) -> String {
    let title = if full_name.trim().is_empty() {
        "Resume preview".to_string()
    } else {
        format!("{} - Resume preview", full_name.trim())
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ margin: 0; padding: 32px 0; background: #e5e7eb; }}
.paper {{ width: {width}px; margin: 0 auto; box-shadow: 0 4px 24px rgba(0, 0, 0, 0.18); }}
.paper svg {{ display: block; }}
</style>
</head>
<body>
<div class="paper" data-template="{template}">
{svg}</div>
</body>
</html>
"#,
        title = escape(&title),
        width = page.width,
        template = page.template.as_str(),
        svg = to_svg(page),
    )
}
