use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::render::{show, show_list, show_pending};
use super::{
    Commands, ContractCommand, CreatePropertyArgs, OutputFormat, PropertyCommand, RegisterArgs,
    UpdatePropertyArgs, UserCommand,
};
use crate::api::{ApiClient, ApiFailure, ApiResponse};
use crate::app::AppState;
use crate::forms::{parse_price, validate_login, RegistrationForm};
use crate::models::{CreateContractData, CreatePropertyData, UpdatePropertyData, UpdateUserData};
use crate::utils::{log_progress, DomuError};

const NO_PROPERTIES_FOUND: &str = "No se encontraron propiedades.";
const NO_USERS_FOUND: &str = "No se encontraron usuarios.";
const NO_CONTRACTS_FOUND: &str = "No tienes contratos.";

/// Handle CLI subcommands
///
/// Returns whether the command succeeded. `Init` is handled by the entry
/// point before any state exists.
pub async fn handle_command(
    command: &Commands,
    state: &AppState,
    format: OutputFormat,
) -> Result<bool> {
    match command {
        Commands::Init => Ok(true),
        Commands::Status => {
            show_status(state).await;
            Ok(true)
        }
        Commands::Register(args) => register(args, state, format).await,
        Commands::Login { email, password } => login(email, password, state, format).await,
        Commands::Logout => {
            state.session.logout();
            println!("{} Sesión cerrada.", "[OK]".green());
            Ok(true)
        }
        Commands::Whoami => match state.session.user() {
            Some(user) => Ok(show(ApiResponse::success(user), format)),
            None => Ok(signed_out(format)),
        },
        Commands::Property(command) => property_command(command, state, format).await,
        Commands::Contract(command) => contract_command(command, state, format).await,
        Commands::User(command) => user_command(command, state, format).await,
    }
}

async fn register(args: &RegisterArgs, state: &AppState, format: OutputFormat) -> Result<bool> {
    let data = RegistrationForm {
        name: args.name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        confirm_password: args.confirm_password.clone(),
        role: args.role,
    }
    .validate()?;

    let (_scope, api) = state.open_screen("register");
    let response = api.register(&data).await;

    // The account exists but the user still logs in explicitly
    let response = if response.is_success() {
        ApiResponse::acknowledged(format!(
            "¡Cuenta de {} creada! Ahora puedes iniciar sesión.",
            data.role.display_name()
        ))
    } else {
        response.map(|_| ())
    };
    Ok(show(response, format))
}

async fn login(
    email: &str,
    password: &str,
    state: &AppState,
    format: OutputFormat,
) -> Result<bool> {
    let data = validate_login(email, password)?;

    let (_scope, api) = state.open_screen("login");
    let response = api.login(&data).await;

    if let Some(session) = response.data() {
        state
            .session
            .login(session.token.clone(), session.user.clone());
    }
    Ok(show(response, format))
}

async fn property_command(
    command: &PropertyCommand,
    state: &AppState,
    format: OutputFormat,
) -> Result<bool> {
    let (_scope, api) = state.open_screen("property");
    show_pending(format);

    let ok = match command {
        PropertyCommand::List => {
            show_list(api.list_properties().await, format, NO_PROPERTIES_FOUND)
        }
        PropertyCommand::Get { id } => show(api.get_property(id).await, format),
        PropertyCommand::Create(args) => {
            let Some(token) = state.session.token() else {
                return Ok(signed_out(format));
            };
            show(api.create_property(&create_payload(args), &token).await, format)
        }
        PropertyCommand::Update(args) => {
            let Some(token) = state.session.token() else {
                return Ok(signed_out(format));
            };
            update_property(&api, args, &token, format).await?
        }
        PropertyCommand::Delete { id } => {
            let Some(token) = state.session.token() else {
                return Ok(signed_out(format));
            };
            show(api.delete_property(id, &token).await, format)
        }
        PropertyCommand::Mine => {
            let Some(token) = state.session.token() else {
                return Ok(signed_out(format));
            };
            show_list(api.list_my_properties(&token).await, format, NO_PROPERTIES_FOUND)
        }
        PropertyCommand::Search { query } => {
            let Some(token) = state.session.token() else {
                return Ok(signed_out(format));
            };
            show_list(
                api.search_available_properties(query, &token).await,
                format,
                NO_PROPERTIES_FOUND,
            )
        }
    };
    Ok(ok)
}

fn create_payload(args: &CreatePropertyArgs) -> CreatePropertyData {
    CreatePropertyData {
        name: args.name.clone(),
        address: args.address.clone(),
        base_price: parse_price(&args.price),
        kind: args.kind,
        features: args.features.clone(),
        photos: Some(args.photos.clone()),
    }
}

/// Edit form flow: load the stored property, overlay the edits, submit everything
async fn update_property(
    api: &ApiClient,
    args: &UpdatePropertyArgs,
    token: &str,
    format: OutputFormat,
) -> Result<bool> {
    let changes = UpdatePropertyData {
        name: args.name.clone(),
        address: args.address.clone(),
        base_price: args.price.as_deref().map(parse_price),
        kind: args.kind,
        features: args.features.clone(),
        photos: (!args.photos.is_empty()).then(|| args.photos.clone()),
    };
    if changes.is_empty() {
        return Err(DomuError::ValidationError("No hay cambios que guardar.".to_string()).into());
    }

    let current = match api.get_property(&args.id).await {
        ApiResponse::Success {
            data: Some(property),
            ..
        } => property,
        other => return Ok(show(other.map(|_| ()), format)),
    };

    let payload = UpdatePropertyData::from(&current).merge(changes);
    Ok(show(api.update_property(&args.id, &payload, token).await, format))
}

async fn contract_command(
    command: &ContractCommand,
    state: &AppState,
    format: OutputFormat,
) -> Result<bool> {
    let Some(token) = state.session.token() else {
        return Ok(signed_out(format));
    };
    let (_scope, api) = state.open_screen("contract");
    show_pending(format);

    let ok = match command {
        ContractCommand::Create {
            tenant,
            property,
            duration,
            conditions,
        } => {
            // Both parties must exist before the contract is sent
            if format == OutputFormat::Text {
                log_progress(1, 2, "Verificando inquilino y propiedad");
            }
            let (tenant_response, property_response) =
                futures::join!(api.get_user(tenant, &token), api.get_property(property));

            if let Some(failure) = tenant_response.failure().or(property_response.failure()) {
                return Ok(show(ApiResponse::<()>::from(failure.clone()), format));
            }

            if format == OutputFormat::Text {
                log_progress(2, 2, "Creando contrato");
            }
            let data = CreateContractData::starting_at(
                Utc::now(),
                *duration,
                tenant.as_str(),
                property.as_str(),
                conditions.clone(),
            )?;
            show(api.create_contract(&data, &token).await, format)
        }
        ContractCommand::List => {
            show_list(api.list_contracts(&token).await, format, NO_CONTRACTS_FOUND)
        }
        ContractCommand::Get { id } => show(api.get_contract(id, &token).await, format),
        ContractCommand::Cancel { id } => show(api.cancel_contract(id, &token).await, format),
    };
    Ok(ok)
}

async fn user_command(
    command: &UserCommand,
    state: &AppState,
    format: OutputFormat,
) -> Result<bool> {
    let Some(token) = state.session.token() else {
        return Ok(signed_out(format));
    };
    let (_scope, api) = state.open_screen("user");
    show_pending(format);

    let ok = match command {
        UserCommand::Search { query } => {
            show_list(api.search_users(query, &token).await, format, NO_USERS_FOUND)
        }
        UserCommand::Get { id } => show(api.get_user(id, &token).await, format),
        UserCommand::UpdateProfile { name, email } => {
            let Some(current) = state.session.user() else {
                return Ok(signed_out(format));
            };
            if name.is_none() && email.is_none() {
                return Err(
                    DomuError::ValidationError("No hay cambios que guardar.".to_string()).into(),
                );
            }

            let data = UpdateUserData {
                id: current.id,
                name: name.clone(),
                email: email.clone(),
            };
            let response = api.update_profile(&data, &token).await;

            // Keep the stored identity in sync with what the server accepted
            if let Some(updated) = response.data() {
                state.session.login(token.clone(), updated.clone());
            }
            show(response, format)
        }
    };
    Ok(ok)
}

/// A protected command run without a session, in the normalized failure shape
fn signed_out(format: OutputFormat) -> bool {
    show(ApiResponse::<()>::from(ApiFailure::unauthenticated()), format)
}

/// Show configuration, session and backend reachability
async fn show_status(state: &AppState) {
    println!("DOMU Status:");
    println!();
    println!("  Backend: {}", state.api.base_url());

    match state.session.user() {
        Some(user) => println!(
            "  {} Sesión: {} <{}> ({})",
            "[OK]".green(),
            user.name,
            user.email,
            user.role.display_name()
        ),
        None => println!("  {} Sesión: sin iniciar", "[WARNING]".yellow()),
    }

    let (_scope, api) = state.open_screen("status");
    match api.list_properties().await {
        ApiResponse::Success { data, .. } => println!(
            "  {} Servidor: en línea ({} propiedades publicadas)",
            "[OK]".green(),
            data.map(|items| items.len()).unwrap_or(0)
        ),
        ApiResponse::Failure(failure) => {
            println!("  {} Servidor: {}", "[ERROR]".red(), failure.message)
        }
    }

    if state.config.session.persist {
        match state.config.session.resolved_file() {
            Ok(path) => println!("  Sesión guardada en: {}", path.display()),
            Err(e) => println!("  {} Sesión: {}", "[WARNING]".yellow(), e),
        }
    } else {
        println!("  Sesión solo en memoria");
    }
    println!();
}
