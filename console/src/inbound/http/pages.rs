//! Dashboard, placeholder sections and fallback redirects.

use actix_web::{HttpResponse, get};

use super::guard::{Admin, Authenticated};
use super::see_other;
use super::view::Escaped;

const DASHBOARD_PATH: &str = "/dashboard";
const PLACEHOLDER: &str = "<p>Sección en construcción.</p>";

#[get("/dashboard")]
pub async fn dashboard(visitor: Authenticated) -> HttpResponse {
    let name = visitor.session().auth().display_name().unwrap_or_default();
    let body = format!(
        "<p>Bienvenido, {}.</p><p>Usa el menú lateral para gestionar la banda.</p>",
        Escaped(&name)
    );
    visitor.render("Dashboard", &body)
}

#[get("/admin/events")]
pub async fn admin_events(Admin(visitor): Admin) -> HttpResponse {
    visitor.render("Eventos", PLACEHOLDER)
}

#[get("/admin/surveys")]
pub async fn admin_surveys(Admin(visitor): Admin) -> HttpResponse {
    visitor.render("Encuestas", PLACEHOLDER)
}

#[get("/me/events")]
pub async fn my_events(visitor: Authenticated) -> HttpResponse {
    visitor.render("Mis eventos", PLACEHOLDER)
}

#[get("/me/surveys")]
pub async fn my_surveys(visitor: Authenticated) -> HttpResponse {
    visitor.render("Mis encuestas", PLACEHOLDER)
}

/// `/` and every unknown path lead to the dashboard.
pub async fn to_dashboard() -> HttpResponse {
    see_other(DASHBOARD_PATH)
}
