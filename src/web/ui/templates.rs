use askama::Template;
use askama_web::WebTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub satellite: String,
    pub theme: String,
    pub interval_ms: u128,
    pub position_text: Vec<String>,
    pub peaks_text: Vec<String>,
}
