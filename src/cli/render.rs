use colored::Colorize;
use serde::Serialize;

use super::OutputFormat;
use crate::api::ApiResponse;
use crate::models::{Contract, Property, Ref, Session, User};
use crate::runtime::ViewState;

/// Plain-text rendering of a record
pub trait Render {
    fn render(&self) -> String;
}

impl Render for User {
    fn render(&self) -> String {
        format!(
            "{} <{}>  {}  {}",
            self.name.bold(),
            self.email,
            self.role.display_name().cyan(),
            format!("id={}", self.id).dimmed()
        )
    }
}

impl Render for Session {
    fn render(&self) -> String {
        format!(
            "¡Bienvenido(a), {}! Has iniciado sesión como {}.",
            self.user.name.bold(),
            self.user.role
        )
    }
}

impl Render for Property {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{}  {}", self.name.bold(), format!("id={}", self.id).dimmed()),
            format!("  Dirección: {}", self.address),
            format!("  Precio base: ${:.0}", self.base_price),
            format!("  Tipo: {}  Estado: {}", self.kind, status_label(self)),
        ];
        if !self.features.is_empty() {
            lines.push(format!("  Características: {}", self.features));
        }
        if !self.photos.is_empty() {
            lines.push(format!("  Fotos: {}", self.photos.len()));
        }
        if let Some(owner) = self.owner.as_ref().and_then(Ref::populated) {
            lines.push(format!("  Propietario: {} <{}>", owner.name, owner.email));
        }
        lines.join("\n")
    }
}

fn status_label(property: &Property) -> colored::ColoredString {
    use crate::models::PropertyStatus;

    match property.status {
        PropertyStatus::Available => property.status.as_str().green(),
        PropertyStatus::Occupied => property.status.as_str().yellow(),
        PropertyStatus::Maintenance => property.status.as_str().red(),
    }
}

impl Render for Contract {
    fn render(&self) -> String {
        let property = match &self.property {
            Ref::Populated(property) => format!("{} ({})", property.name, property.address),
            Ref::Id(id) => id.clone(),
        };
        let tenant = match &self.tenant {
            Ref::Populated(user) => format!("{} <{}>", user.name, user.email),
            Ref::Id(id) => id.clone(),
        };

        let mut lines = vec![
            format!("Contrato {}", self.id.bold()),
            format!("  Propiedad: {}", property),
            format!("  Inquilino: {}", tenant),
            format!(
                "  Vigencia: {} → {} ({} meses)",
                self.start_date.format("%Y-%m-%d"),
                self.end_date.format("%Y-%m-%d"),
                self.duration
            ),
        ];
        if let Some(conditions) = &self.conditions {
            lines.push(format!("  Condiciones: {}", conditions));
        }
        lines.join("\n")
    }
}

impl Render for () {
    fn render(&self) -> String {
        String::new()
    }
}

/// Print a single-record response; returns false when it was an error
pub fn show<T: Serialize + Render>(response: ApiResponse<T>, format: OutputFormat) -> bool {
    match format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Text => print_view(&ViewState::from_response(response), |item| {
            item.render()
        }),
    }
}

/// Print a list response; an empty list shows `empty_message`, not an error
pub fn show_list<T: Serialize + Render>(
    response: ApiResponse<Vec<T>>,
    format: OutputFormat,
    empty_message: &str,
) -> bool {
    match format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Text => {
            let view = ViewState::from_list(response);
            if matches!(view, ViewState::Empty) {
                println!("{}", empty_message.dimmed());
                return true;
            }
            print_view(&view, |items| {
                items
                    .iter()
                    .map(Render::render)
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })
        }
    }
}

/// Show the loading state of a screen before its request goes out
///
/// Text mode only; JSON output stays a single document.
pub fn show_pending(format: OutputFormat) {
    if format == OutputFormat::Text {
        print_view(&ViewState::<()>::Loading, |_| String::new());
    }
}

fn print_json<T: Serialize>(response: &ApiResponse<T>) -> bool {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "[ERROR]".red(), e),
    }
    response.is_success()
}

fn print_view<T>(view: &ViewState<T>, render: impl Fn(&T) -> String) -> bool {
    match view {
        ViewState::Loading => eprintln!("{}", "Cargando...".dimmed()),
        ViewState::Error(message) => eprintln!("{} {}", "[ERROR]".red(), message),
        ViewState::Empty => println!("{}", "Sin datos.".dimmed()),
        ViewState::Notice(message) => println!("{} {}", "[OK]".green(), message),
        ViewState::Ready(data) => println!("{}", render(data)),
    }
    !view.is_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyKind, PropertyStatus, Role};

    #[test]
    fn test_loading_and_empty_views_are_not_errors() {
        colored::control::set_override(false);

        assert!(print_view(&ViewState::<()>::Loading, |_| String::new()));
        assert!(print_view(&ViewState::<Vec<u8>>::Empty, |_| String::new()));
        assert!(!print_view(
            &ViewState::<()>::Error("Error 500".to_string()),
            |_| String::new()
        ));
    }

    #[test]
    fn test_property_rendering_lists_key_fields() {
        colored::control::set_override(false);

        let property = Property {
            id: "p1".to_string(),
            name: "Casa Sur".to_string(),
            photos: vec![],
            address: "Los Aromos 5".to_string(),
            base_price: 380000.0,
            kind: PropertyKind::House,
            features: String::new(),
            status: PropertyStatus::Maintenance,
            owner: Some(Ref::Populated(Box::new(User {
                id: "u9".to_string(),
                name: "Luis".to_string(),
                role: Role::Owner,
                email: "luis@domu.cl".to_string(),
            }))),
            owner_id: None,
            created_at: None,
            updated_at: None,
        };

        let text = property.render();
        assert!(text.contains("Casa Sur"));
        assert!(text.contains("$380000"));
        assert!(text.contains("Tipo: casa  Estado: mantenimiento"));
        assert!(text.contains("Propietario: Luis <luis@domu.cl>"));
        assert!(!text.contains("Características"));
    }
}
