//! Thin Google Drive v3 REST client
//!
//! Only the surface the sync service needs: folders, multipart upload,
//! listing, deletion and sharing. Base URLs are overridable for tests.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::DriveError;
use crate::session::DriveSession;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

const FILE_FIELDS: &str = "id,name,mimeType,size,modifiedTime,webViewLink,webContentLink,parents";

/// A file or folder as returned by the Drive API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Byte size as a decimal string; folders have none.
    pub size: Option<String>,
    pub modified_time: Option<String>,
    pub web_view_link: Option<String>,
    pub web_content_link: Option<String>,
    pub parents: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FileList {
    files: Option<Vec<DriveFile>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<Vec<&'a str>>,
}

/// Sharing role for [`DriveApi::share_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareRole {
    Reader,
    Writer,
    Owner,
}

impl ShareRole {
    fn as_str(self) -> &'static str {
        match self {
            ShareRole::Reader => "reader",
            ShareRole::Writer => "writer",
            ShareRole::Owner => "owner",
        }
    }
}

/// The Drive operations the sync service depends on.
#[async_trait]
pub trait DriveApi: Send + Sync {
    async fn create_folder(
        &self,
        session: &DriveSession,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<DriveFile, DriveError>;

    async fn upload_file(
        &self,
        session: &DriveSession,
        name: &str,
        content_type: &str,
        data: Bytes,
        folder_id: Option<&str>,
    ) -> Result<DriveFile, DriveError>;

    async fn list_files(
        &self,
        session: &DriveSession,
        folder_id: Option<&str>,
        name_query: Option<&str>,
    ) -> Result<Vec<DriveFile>, DriveError>;

    async fn delete_file(&self, session: &DriveSession, file_id: &str) -> Result<(), DriveError>;

    async fn share_file(
        &self,
        session: &DriveSession,
        file_id: &str,
        email: &str,
        role: ShareRole,
    ) -> Result<(), DriveError>;
}

/// reqwest-backed [`DriveApi`] implementation.
pub struct DriveClient {
    http: reqwest::Client,
    api_base: String,
    upload_base: String,
}

impl DriveClient {
    pub fn new() -> Self {
        Self::with_base_urls(API_BASE.to_string(), UPLOAD_BASE.to_string())
    }

    /// Point the client at alternative endpoints (e.g. a local stub server).
    pub fn with_base_urls(api_base: String, upload_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            upload_base,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(DriveError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Default for DriveClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriveApi for DriveClient {
    async fn create_folder(
        &self,
        session: &DriveSession,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<DriveFile, DriveError> {
        let token = session.access_token()?;
        let metadata = FileMetadata {
            name,
            mime_type: Some(FOLDER_MIME_TYPE),
            parents: parent_id.map(|p| vec![p]),
        };

        let response = self
            .http
            .post(format!("{}/files", self.api_base))
            .bearer_auth(token)
            .query(&[("fields", FILE_FIELDS)])
            .json(&metadata)
            .send()
            .await?;

        let folder: DriveFile = Self::check(response).await?.json().await?;
        tracing::debug!(folder_id = %folder.id, name = %folder.name, "Created Drive folder");
        Ok(folder)
    }

    async fn upload_file(
        &self,
        session: &DriveSession,
        name: &str,
        content_type: &str,
        data: Bytes,
        folder_id: Option<&str>,
    ) -> Result<DriveFile, DriveError> {
        let token = session.access_token()?;
        let metadata = FileMetadata {
            name,
            mime_type: None,
            parents: folder_id.map(|f| vec![f]),
        };
        let metadata_json = serde_json::to_string(&metadata)?;

        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata_json)
                    .mime_str("application/json")
                    .map_err(DriveError::Http)?,
            )
            .part(
                "file",
                Part::bytes(data.to_vec())
                    .mime_str(content_type)
                    .map_err(DriveError::Http)?,
            );

        let response = self
            .http
            .post(format!("{}/files", self.upload_base))
            .bearer_auth(token)
            .query(&[("uploadType", "multipart"), ("fields", FILE_FIELDS)])
            .multipart(form)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_files(
        &self,
        session: &DriveSession,
        folder_id: Option<&str>,
        name_query: Option<&str>,
    ) -> Result<Vec<DriveFile>, DriveError> {
        let token = session.access_token()?;

        let mut q = String::new();
        if let Some(folder_id) = folder_id {
            q.push_str(&format!("'{}' in parents", folder_id));
        }
        if let Some(name_query) = name_query {
            if !q.is_empty() {
                q.push_str(" and ");
            }
            q.push_str(&format!("name contains '{}'", name_query.replace('\'', "\\'")));
        }

        let mut request = self
            .http
            .get(format!("{}/files", self.api_base))
            .bearer_auth(token)
            .query(&[("fields", format!("files({})", FILE_FIELDS))]);
        if !q.is_empty() {
            request = request.query(&[("q", q)]);
        }

        let list: FileList = Self::check(request.send().await?).await?.json().await?;
        Ok(list.files.unwrap_or_default())
    }

    async fn delete_file(&self, session: &DriveSession, file_id: &str) -> Result<(), DriveError> {
        let token = session.access_token()?;
        let response = self
            .http
            .delete(format!("{}/files/{}", self.api_base, file_id))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn share_file(
        &self,
        session: &DriveSession,
        file_id: &str,
        email: &str,
        role: ShareRole,
    ) -> Result<(), DriveError> {
        let token = session.access_token()?;
        let permission = serde_json::json!({
            "type": "user",
            "role": role.as_str(),
            "emailAddress": email,
        });

        let response = self
            .http
            .post(format!("{}/files/{}/permissions", self.api_base, file_id))
            .bearer_auth(token)
            .json(&permission)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
