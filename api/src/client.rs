//! HTTP implementation of [`BackendApi`]

use crate::{
    backend::BackendApi,
    error::ApiError,
    likes::LikeChange,
    types::{
        Account, Comment, Credentials, NewComment, NewProfile, NewReview, Profile, ProfileUpdate,
        Review, TokenPair, Upload,
    },
};
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;

/// Backend client over HTTP
///
/// Authenticated requests carry `Authorization: JWT <token>`.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend rooted at `base_url`
    ///
    /// A trailing `/` is added when missing.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client
    #[must_use]
    pub fn with_http_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { client, base_url }
    }

    /// Root URL all paths are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("JWT {token}"))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}

fn file_part(upload: &Upload) -> Result<Part, ApiError> {
    let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
    match &upload.mime {
        Some(mime) => part
            .mime_str(mime)
            .map_err(|e| ApiError::InvalidUpload(e.to_string())),
        None => Ok(part),
    }
}

impl BackendApi for BackendClient {
    #[tracing::instrument(skip_all, name = "api_authenticate")]
    async fn authenticate(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        Self::send(self.client.post(self.url("authen/jwt/create")).json(credentials)).await
    }

    #[tracing::instrument(skip_all, name = "api_register")]
    async fn register(&self, credentials: &Credentials) -> Result<Account, ApiError> {
        Self::send(self.client.post(self.url("api/register/")).json(credentials)).await
    }

    #[tracing::instrument(skip_all, name = "api_create_profile")]
    async fn create_profile(&self, token: &str, profile: &NewProfile) -> Result<Profile, ApiError> {
        let request = self.client.post(self.url("api/profile/")).json(profile);
        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_update_profile", fields(profile = %update.id))]
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let mut form = Form::new().text("nickName", update.nick_name.clone());
        if let Some(avatar) = &update.avatar {
            form = form.part("avatar", file_part(avatar)?);
        }

        let request = self
            .client
            .put(self.url(&format!("api/profile/{}/", update.id)))
            .multipart(form);
        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_my_profile")]
    async fn my_profile(&self, token: &str) -> Result<Profile, ApiError> {
        let request = self.client.get(self.url("api/myprofile/"));
        let profiles: Vec<Profile> = Self::send(Self::authorized(request, token)).await?;

        profiles
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::EmptyCollection("api/myprofile/".to_string()))
    }

    #[tracing::instrument(skip_all, name = "api_profiles")]
    async fn profiles(&self, token: &str) -> Result<Vec<Profile>, ApiError> {
        let request = self.client.get(self.url("api/profile/"));
        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_reviews")]
    async fn reviews(&self, token: &str) -> Result<Vec<Review>, ApiError> {
        let request = self.client.get(self.url("api/review/"));
        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_create_review")]
    async fn create_review(&self, token: &str, review: &NewReview) -> Result<Review, ApiError> {
        let mut form = Form::new()
            .text("title", review.title.clone())
            .text("bookName", review.book_name.clone())
            .text("content", review.content.clone());
        if let Some(img) = &review.img {
            form = form.part("img", file_part(img)?);
        }

        let request = self.client.post(self.url("api/review/")).multipart(form);
        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_update_likes", fields(review = %change.review()))]
    async fn update_likes(&self, token: &str, change: &LikeChange) -> Result<Review, ApiError> {
        let request = match change {
            LikeChange::ReplaceAll { review, title } => {
                let form = Form::new().text("title", title.clone());
                self.client
                    .put(self.url(&format!("api/review/{review}/")))
                    .multipart(form)
            },
            LikeChange::Patch { review, liked } => {
                let form = liked
                    .iter()
                    .fold(Form::new(), |form, user| form.text("liked", user.to_string()));
                // The partial-update route has no trailing slash
                self.client
                    .patch(self.url(&format!("api/review/{review}")))
                    .multipart(form)
            },
        };

        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_comments")]
    async fn comments(&self, token: &str) -> Result<Vec<Comment>, ApiError> {
        let request = self.client.get(self.url("api/comment/"));
        Self::send(Self::authorized(request, token)).await
    }

    #[tracing::instrument(skip_all, name = "api_create_comment", fields(review = %comment.review))]
    async fn create_comment(&self, token: &str, comment: &NewComment) -> Result<Comment, ApiError> {
        let request = self.client.post(self.url("api/comment/")).json(comment);
        Self::send(Self::authorized(request, token)).await
    }
}
