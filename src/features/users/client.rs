//! Client for the users REST endpoints. Paths are relative to the configured
//! base URL, which is the users collection itself.

use crate::{
    app_lib::{ApiClient, AppConfig, AppError},
    features::users::types::{User, UserId, UserPayload},
};

/// The four calls the console makes against the users collection.
#[allow(async_fn_in_trait)]
pub trait UsersApi {
    /// `GET {base}`
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// `POST {base}`; the response body is ignored.
    async fn create_user(&self, payload: &UserPayload) -> Result<(), AppError>;

    /// `PUT {base}/{id}`; the response body is ignored.
    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> Result<(), AppError>;

    /// `DELETE {base}/{id}`; the response body is ignored.
    async fn delete_user(&self, id: &UserId) -> Result<(), AppError>;
}

/// `UsersApi` over HTTP.
#[derive(Clone, Debug)]
pub struct UsersClient {
    api: ApiClient,
}

impl UsersClient {
    /// Builds a client for the configured users collection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the base URL is blank or the HTTP client
    /// cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        // A blank base would send the list to the page itself and rows to `/{id}`.
        if config.api_base_url.trim().is_empty() {
            return Err(AppError::Config(
                "Users API URL is empty; set USERS_CRUD_API_URL.".to_string(),
            ));
        }

        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }
}

impl UsersApi for UsersClient {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.api.get_json("").await
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<(), AppError> {
        self.api.post_json("", payload).await
    }

    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> Result<(), AppError> {
        self.api.put_json(&user_path(id)?, payload).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), AppError> {
        self.api.delete(&user_path(id)?).await
    }
}

/// Path of one record, after basic input validation.
fn user_path(id: &UserId) -> Result<String, AppError> {
    let trimmed = id.as_str().trim();
    if trimmed.is_empty() {
        return Err(AppError::Config("User id is required.".to_string()));
    }

    Ok(format!("/{trimmed}"))
}
