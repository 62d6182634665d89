use askama::Template;

pub struct ProgressRow {
    pub checkbox_id: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Template)]
#[template(path = "query_progress.html")]
pub struct QueryProgressTemplate {
    pub rows: Vec<ProgressRow>,
    pub complete: bool,
}
