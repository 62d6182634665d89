use askama::Template;
use crate::artifacts::SvgDefinition;

#[derive(Template)]
#[template(path = "canvas.svg", escape = "html")]
pub struct CanvasTemplate<'a> {
    pub width: i64,
    pub height: i64,
    pub title: &'a str,
    pub nodes: &'a [SvgDefinition],
}
