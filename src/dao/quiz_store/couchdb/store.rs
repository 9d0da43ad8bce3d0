use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::from_value;

use crate::dao::{
    models::{QuestionEntity, TeamRecordEntity},
    quiz_store::QuizStore,
    storage::StorageResult,
};

use super::{
    config::CouchConfig,
    error::{CouchError, CouchResult},
    models::{
        AllDocsResponse, CouchQuestionDocument, CouchTeamDocument, END_SUFFIX, QUESTION_PREFIX,
        team_doc_id,
    },
};

/// CouchDB-backed implementation of [`QuizStore`].
///
/// Holds one absolute database URL; every document lives directly under it.
/// Cloning shares the HTTP connection pool.
#[derive(Clone)]
pub struct CouchQuizStore {
    client: Client,
    db_url: Arc<str>,
    auth: Option<Arc<(String, String)>>,
}

impl CouchQuizStore {
    /// Connect to CouchDB, creating the configured database when absent.
    pub async fn connect(config: CouchConfig) -> CouchResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| CouchError::BuildClient { source })?;

        let db_url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.database
        );
        let store = Self {
            client,
            db_url: Arc::from(db_url),
            auth: config.credentials().map(Arc::new),
        };
        store.ensure_database().await?;
        Ok(store)
    }

    /// Send a request, attaching basic-auth credentials when configured.
    async fn dispatch(&self, request: RequestBuilder, url: &str) -> CouchResult<Response> {
        let request = match self.auth.as_deref() {
            Some((user, pass)) => request.basic_auth(user, Some(pass)),
            None => request,
        };
        request.send().await.map_err(|source| CouchError::Http {
            url: url.to_string(),
            source,
        })
    }

    fn accept(response: Response, url: &str) -> CouchResult<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(CouchError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status(),
            })
        }
    }

    fn doc_url(&self, doc_id: &str) -> String {
        format!("{}/{}", self.db_url, doc_id)
    }

    /// Probe the database, creating it on the first run against a fresh server.
    async fn ensure_database(&self) -> CouchResult<()> {
        let url = self.db_url.to_string();
        let probe = self.dispatch(self.client.get(url.as_str()), &url).await?;
        match probe.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => {
                let created = self.dispatch(self.client.put(url.as_str()), &url).await?;
                Self::accept(created, &url).map(drop)
            }
            status => Err(CouchError::UnexpectedStatus { url, status }),
        }
    }

    /// Fetch one document, mapping CouchDB's 404 to `None`.
    async fn fetch_doc<T: DeserializeOwned>(&self, doc_id: &str) -> CouchResult<Option<T>> {
        let url = self.doc_url(doc_id);
        let response = self.dispatch(self.client.get(&url), &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document = Self::accept(response, &url)?
            .json::<T>()
            .await
            .map_err(|source| CouchError::BadPayload { url, source })?;
        Ok(Some(document))
    }

    /// Write one document, failing on any non-success answer.
    async fn store_doc<T: Serialize>(&self, doc_id: &str, document: &T) -> CouchResult<()> {
        let url = self.doc_url(doc_id);
        let request = self.client.put(&url).json(document);
        let response = self.dispatch(request, &url).await?;
        Self::accept(response, &url).map(drop)
    }

    /// Query `_all_docs` over one id prefix and deserialize every row.
    async fn fetch_prefixed<T: DeserializeOwned>(&self, prefix: &str) -> CouchResult<Vec<T>> {
        let url = format!("{}/_all_docs", self.db_url);
        let first = format!("\"{prefix}\"");
        let last = format!("\"{prefix}{END_SUFFIX}\"");
        let request = self.client.get(&url).query(&[
            ("include_docs", "true"),
            ("startkey", first.as_str()),
            ("endkey", last.as_str()),
        ]);

        let response = Self::accept(self.dispatch(request, &url).await?, &url)?;
        let listing: AllDocsResponse = response
            .json()
            .await
            .map_err(|source| CouchError::BadPayload { url, source })?;

        listing
            .rows
            .into_iter()
            .filter_map(|row| row.doc.map(|doc| (row.id, doc)))
            .map(|(doc_id, value)| {
                from_value(value).map_err(|source| CouchError::BadDocument { doc_id, source })
            })
            .collect()
    }
}

impl QuizStore for CouchQuizStore {
    fn load_all_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let documents = store
                .fetch_prefixed::<CouchQuestionDocument>(QUESTION_PREFIX)
                .await?;
            documents
                .into_iter()
                .map(|doc| QuestionEntity::try_from(doc).map_err(Into::into))
                .collect()
        })
    }

    fn load_team_record(
        &self,
        team_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<TeamRecordEntity>>> {
        let store = self.clone();
        let doc_id = team_doc_id(team_id);
        Box::pin(async move {
            store
                .fetch_doc::<CouchTeamDocument>(&doc_id)
                .await?
                .map(|doc| TeamRecordEntity::try_from(doc).map_err(Into::into))
                .transpose()
        })
    }

    fn save_team_record(&self, record: TeamRecordEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let doc_id = team_doc_id(&record.team_id);
            let current_rev = store
                .fetch_doc::<CouchTeamDocument>(&doc_id)
                .await?
                .and_then(|existing| existing.rev);
            let document = CouchTeamDocument::from((record, current_rev));
            store
                .store_doc(&doc_id, &document)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let url = store.db_url.to_string();
            let response = store.dispatch(store.client.head(url.as_str()), &url).await?;
            Self::accept(response, &url)?;
            Ok(())
        })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_database().await.map_err(Into::into) })
    }
}
