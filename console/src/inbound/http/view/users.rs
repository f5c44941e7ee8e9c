//! Users page markup.

use super::forms::{notice_banner, text_input};
use super::{Escaped, pagination_bar, table};
use crate::domain::format::{display_date, display_flag, display_text};
use crate::domain::listing::ViewMode;
use crate::domain::listing::users::{ActiveFilter, UserFilters, UserSortField, UsersPage};
use crate::domain::table::{Column, RowAction, Table};
use crate::domain::{Role, User, UserDraft};

/// Base path of the users page and its actions.
pub const USERS_PATH: &str = "/admin/users";

/// Column set of the users table.
#[must_use]
pub fn users_table() -> Table<User, UserSortField> {
    Table::new(vec![
        Column::text("username", "Usuario", |u: &User| u.username.clone())
            .sortable(UserSortField::Username),
        Column::text("firstName", "Nombre", |u: &User| u.first_name.clone())
            .sortable(UserSortField::FirstName),
        Column::text("lastName", "Apellidos", User::surnames).sortable(UserSortField::LastName),
        Column::text("email", "Email", |u: &User| u.email.clone()).sortable(UserSortField::Email),
        Column::text("roles", "Roles", User::roles_label),
        Column::text("active", "Activo", |u: &User| display_flag(u.active).to_owned())
            .sortable(UserSortField::Active),
        Column::actions("actions", "Acciones", |u: &User| {
            let toggle = if u.active { "Desactivar" } else { "Activar" };
            vec![
                RowAction::post("Ver", format!("{USERS_PATH}/{}/view", u.id)),
                RowAction::post("Editar", format!("{USERS_PATH}/{}/edit", u.id)),
                RowAction::post(toggle, format!("{USERS_PATH}/{}/toggle-active", u.id)),
                RowAction::danger("Eliminar", format!("{USERS_PATH}/{}/delete", u.id)),
            ]
        })
        .width("18rem"),
    ])
}

/// Main content of the users page for its current mode.
#[must_use]
pub fn users_body(page: &UsersPage, roles: &[Role]) -> String {
    let mut out = notice_banner(page.notice());
    match page.mode() {
        ViewMode::Detail { entity } => out.push_str(&detail_panel(entity)),
        ViewMode::Edit { entity, draft } => out.push_str(&edit_form(entity, draft)),
        ViewMode::List | ViewMode::Create { .. } => {}
    }
    out.push_str(&filters_form(page.filters(), roles));
    let view = users_table().render(page.rows(), Some(page.sort()));
    out.push_str(&table(&view, USERS_PATH));
    out.push_str(&pagination_bar(&page.pagination(), USERS_PATH));
    out
}

fn filters_form(filters: &UserFilters, roles: &[Role]) -> String {
    let mut out = format!("<form method=\"post\" action=\"{USERS_PATH}/search\"><fieldset><legend>Buscar</legend>");
    out.push_str(&text_input("Usuario", "username", &filters.username, "text"));
    out.push_str(&text_input("Nombre", "first_name", &filters.first_name, "text"));
    out.push_str(&text_input("Primer apellido", "last_name", &filters.last_name, "text"));
    out.push_str(&text_input(
        "Segundo apellido",
        "second_last_name",
        &filters.second_last_name,
        "text",
    ));
    out.push_str(&text_input("Email", "email", &filters.email, "text"));
    out.push_str("<p><label>Activo <select name=\"active\">");
    for (option, label) in [
        (ActiveFilter::All, "Todos"),
        (ActiveFilter::Active, "Sí"),
        (ActiveFilter::Inactive, "No"),
    ] {
        let selected = if option == filters.active { " selected" } else { "" };
        out.push_str(&format!(
            "<option value=\"{}\"{selected}>{label}</option>",
            option.as_str()
        ));
    }
    out.push_str("</select></label></p><p><label>Rol <select name=\"role_name\"><option value=\"\">Todos</option>");
    for role in roles {
        let selected = if role.name == filters.role_name { " selected" } else { "" };
        out.push_str(&format!(
            "<option value=\"{name}\"{selected}>{name}</option>",
            name = Escaped(&role.name)
        ));
    }
    out.push_str("</select></label></p><button type=\"submit\">Buscar</button></fieldset></form>");
    out
}

fn detail_panel(user: &User) -> String {
    let rows = [
        ("Usuario", user.username.clone()),
        ("Nombre", user.first_name.clone()),
        ("Apellidos", user.surnames()),
        ("Email", user.email.clone()),
        ("Teléfono", display_text(user.phone.as_deref()).to_owned()),
        ("Fecha de nacimiento", display_date(user.birth_date)),
        ("Fecha de alta en la banda", display_date(user.band_join_date)),
        ("Fecha de registro", display_date(user.system_signup_date)),
        ("Activo", display_flag(user.active).to_owned()),
        ("Roles", non_empty(user.roles_label())),
        ("Instrumentos", non_empty(user.instruments_label())),
        ("Notas", display_text(user.notes.as_deref()).to_owned()),
        ("Foto de perfil", display_text(user.profile_picture_url.as_deref()).to_owned()),
    ];
    let mut out = String::from("<section><h2>Detalle de usuario</h2><dl>");
    for (label, value) in rows {
        out.push_str(&format!("<dt>{label}</dt><dd>{}</dd>", Escaped(&value)));
    }
    out.push_str(&format!(
        "</dl><form class=\"inline\" method=\"post\" action=\"{USERS_PATH}/{id}/edit\">\
<button type=\"submit\">Editar</button></form> \
<form class=\"inline\" method=\"post\" action=\"{USERS_PATH}/cancel\">\
<button type=\"submit\">Cerrar</button></form></section>",
        id = user.id
    ));
    out
}

fn non_empty(label: String) -> String {
    if label.is_empty() {
        display_text(None).to_owned()
    } else {
        label
    }
}

fn edit_form(user: &User, draft: &UserDraft) -> String {
    let mut out = format!(
        "<section><h2>Editar usuario {}</h2><form method=\"post\" action=\"{USERS_PATH}/save\">",
        Escaped(&user.username)
    );
    out.push_str(&text_input("Email", "email", &draft.email, "email"));
    out.push_str(&text_input("Nombre", "first_name", &draft.first_name, "text"));
    out.push_str(&text_input("Primer apellido", "last_name", &draft.last_name, "text"));
    out.push_str(&text_input(
        "Segundo apellido",
        "second_last_name",
        &draft.second_last_name,
        "text",
    ));
    out.push_str(&text_input("Fecha de nacimiento", "birth_date", &draft.birth_date, "date"));
    out.push_str(&text_input(
        "Fecha de alta en la banda",
        "band_join_date",
        &draft.band_join_date,
        "date",
    ));
    out.push_str(&text_input("Teléfono", "phone", &draft.phone, "tel"));
    out.push_str(&text_input("Notas", "notes", &draft.notes, "text"));
    out.push_str(&text_input(
        "Foto de perfil (URL)",
        "profile_picture_url",
        &draft.profile_picture_url,
        "url",
    ));
    out.push_str(&format!(
        "<button type=\"submit\">Guardar</button></form>\
<form class=\"inline\" method=\"post\" action=\"{USERS_PATH}/cancel\">\
<button type=\"submit\">Cancelar</button></form></section>"
    ));
    out
}

/// Confirmation prompt before enabling or disabling `user`.
#[must_use]
pub fn toggle_prompt(user: &User) -> String {
    let verb = if user.active { "desactivar" } else { "activar" };
    format!("¿Seguro que quieres {verb} al usuario \"{}\"?", user.username)
}

/// Confirmation prompt before deleting `user`.
#[must_use]
pub fn delete_prompt(user: &User) -> String {
    format!(
        "¿Seguro que quieres eliminar al usuario \"{}\"? Esta acción no se puede deshacer.",
        user.username
    )
}
