use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use userdash_shared::cors::CorsPolicy;
use userdash_shared::{users, AppState};

/// The deployed functions, addressed by the path segment carrying their name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    GetUsers,
    GetUserById,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl Function {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "getUsers" => Some(Function::GetUsers),
            "getUserById" => Some(Function::GetUserById),
            "createUser" => Some(Function::CreateUser),
            "updateUser" => Some(Function::UpdateUser),
            "deleteUser" => Some(Function::DeleteUser),
            _ => None,
        }
    }

    fn method(self) -> Method {
        match self {
            Function::GetUsers | Function::GetUserById => Method::GET,
            Function::CreateUser => Method::POST,
            Function::UpdateUser => Method::PUT,
            Function::DeleteUser => Method::DELETE,
        }
    }
}

/// Find the function named in `path` and an optional id segment following it.
///
/// Leading segments such as a stage name are skipped, so `/prod/getUsers` and
/// `/getUserById/<id>` both resolve.
fn resolve(path: &str) -> Option<(Function, Option<&str>)> {
    let mut parts = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = parts.next() {
        if let Some(function) = Function::from_segment(segment) {
            return Some((function, parts.next()));
        }
    }
    None
}

/// Main Lambda handler - applies the CORS gate and routes to the user handlers
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!("User API invoked - Method: {} Path: {}", method, path);

    if CorsPolicy::is_preflight(method) {
        return state.cors.preflight();
    }

    let mut response = route(&event, &state).await?;
    state.cors.decorate(&mut response)?;
    Ok(response)
}

async fn route(event: &Request, state: &AppState) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body = event.body();

    let Some((function, path_id)) = resolve(path) else {
        tracing::warn!("No route matched - Method: {} Path: {}", method, path);
        return users::text_response(StatusCode::NOT_FOUND, "Not found");
    };

    if *method != function.method() {
        tracing::warn!("Method {} not allowed for {:?}", method, function);
        return users::text_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let user_id = event
        .query_string_parameters_ref()
        .and_then(|params| params.first("userId"))
        .or(path_id)
        .unwrap_or("");

    match function {
        Function::GetUsers => users::get_users(&state.users).await,
        Function::GetUserById => users::get_user_by_id(&state.users, user_id).await,
        Function::CreateUser => users::create_user(&state.users, body).await,
        Function::UpdateUser => users::update_user(&state.users, user_id, body).await,
        Function::DeleteUser => users::delete_user(&state.users, user_id).await,
    }
}
