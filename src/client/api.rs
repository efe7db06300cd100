use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ClientError;
use crate::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::{Project, ProjectInput, Task, TaskInput};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper over `reqwest::Client` for the TaskFlow REST API.
///
/// When a token is set it is sent as `Authorization: Bearer <token>` on
/// every request.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .ok()
            .filter(|msg| !msg.is_empty())
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "Request failed".to_string());
        log::debug!("{} answered {}: {}", self.base_url, status, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.send(builder).await?.json::<T>().await?)
    }

    async fn json_with<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.json(self.request(method, path).json(body)).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        self.json_with(Method::POST, "/api/auth/register", request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.json_with(Method::POST, "/api/auth/login", request).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.json(self.request(Method::GET, "/api/projects")).await
    }

    pub async fn get_project(&self, id: i32) -> Result<Project, ClientError> {
        self.json(self.request(Method::GET, &format!("/api/projects/{}", id)))
            .await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ClientError> {
        self.json_with(Method::POST, "/api/projects", input).await
    }

    pub async fn update_project(
        &self,
        id: i32,
        input: &ProjectInput,
    ) -> Result<Project, ClientError> {
        self.json_with(Method::PUT, &format!("/api/projects/{}", id), input)
            .await
    }

    pub async fn delete_project(&self, id: i32) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &format!("/api/projects/{}", id)))
            .await?;
        Ok(())
    }

    pub async fn list_tasks(&self, project_id: i32) -> Result<Vec<Task>, ClientError> {
        self.json(self.request(Method::GET, &tasks_path(project_id)))
            .await
    }

    pub async fn get_task(&self, project_id: i32, id: i32) -> Result<Task, ClientError> {
        self.json(self.request(Method::GET, &task_path(project_id, id)))
            .await
    }

    pub async fn create_task(
        &self,
        project_id: i32,
        input: &TaskInput,
    ) -> Result<Task, ClientError> {
        self.json_with(Method::POST, &tasks_path(project_id), input)
            .await
    }

    pub async fn update_task(
        &self,
        project_id: i32,
        id: i32,
        input: &TaskInput,
    ) -> Result<Task, ClientError> {
        self.json_with(Method::PUT, &task_path(project_id, id), input)
            .await
    }

    pub async fn toggle_task(&self, project_id: i32, id: i32) -> Result<Task, ClientError> {
        let path = format!("{}/toggle", task_path(project_id, id));
        self.json(self.request(Method::PATCH, &path)).await
    }

    pub async fn delete_task(&self, project_id: i32, id: i32) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &task_path(project_id, id)))
            .await?;
        Ok(())
    }
}

fn tasks_path(project_id: i32) -> String {
    format!("/api/projects/{}/tasks", project_id)
}

fn task_path(project_id: i32, id: i32) -> String {
    format!("{}/{}", tasks_path(project_id), id)
}
