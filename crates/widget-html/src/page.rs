//! Standalone preview page around a rendered widget.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

const PAGE: &str = "page";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}} Preview</title>
<style>
  body {
    margin: 0;
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    background: {{{background}}};
  }
  .widget-container {
    box-shadow: 0 8px 32px rgba(0, 0, 0, 0.4);
    border-radius: 16px;
  }
</style>
</head>
<body>
<div class="widget-container">{{{widget}}}</div>
</body>
</html>
"#;

const DEFAULT_BACKGROUND: &str = "linear-gradient(135deg, #1a1a2e 0%, #16213e 100%)";

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    widget: &'a str,
    background: String,
}

/// Renders the page shell. The title is HTML-escaped; the widget markup is
/// inserted as-is.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(PAGE, PAGE_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, title: &str, widget: &str, background_image: Option<&str>) -> Result<String> {
        let context = PageContext {
            title,
            widget,
            background: page_background(background_image),
        };
        Ok(self.handlebars.render(PAGE, &context)?)
    }
}

/// CSS background for the page body. Characters that could end the
/// `url("...")` token are dropped from the image path.
fn page_background(image: Option<&str>) -> String {
    match image.map(str::trim).filter(|path| !path.is_empty()) {
        Some(path) => {
            let safe: String = path
                .chars()
                .filter(|c| !matches!(c, '"' | '\'' | '\\' | '<' | '>' | '(' | ')' | ';'))
                .collect();
            format!("url(\"{safe}\") center / cover no-repeat")
        }
        None => DEFAULT_BACKGROUND.to_string(),
    }
}
