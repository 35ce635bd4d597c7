//! CRUD operations shared by every REST resource.

use super::{settled, Payload, RepoContext};
use crate::client::ApiRequest;
use crate::envelope::{Envelope, Void};
use crate::error_kind::ErrorKind;
use crate::models::StatusChange;
use crate::observable::Observable;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

pub const SEARCH_TERM_REQUIRED: &str = "Término de búsqueda requerido";

/// Success messages a resource republishes its outcomes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLabels {
    pub listed: &'static str,
    pub fetched: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub status_changed: &'static str,
}

/// Repository for a resource living under `base` (e.g. `clients`).
pub struct ResourceRepository<T> {
    pub(crate) ctx: RepoContext,
    base: &'static str,
    labels: &'static ResourceLabels,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceRepository<T> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            base: self.base,
            labels: self.labels,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRepository")
            .field("base", &self.base)
            .finish()
    }
}

impl<T: Payload + Serialize> ResourceRepository<T> {
    pub(crate) fn new(ctx: RepoContext, base: &'static str, labels: &'static ResourceLabels) -> Self {
        Self {
            ctx,
            base,
            labels,
            _marker: PhantomData,
        }
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn labels(&self) -> &'static ResourceLabels {
        self.labels
    }

    /// `base` joined with a sub-path template.
    pub(crate) fn path(&self, suffix: &str) -> String {
        format!("{}/{}", self.base, suffix)
    }

    pub fn list(&self) -> Observable<Envelope<Vec<T>>> {
        self.ctx
            .dispatch(ApiRequest::get(self.base), self.labels.listed, 200)
    }

    pub fn get(&self, id: i64) -> Observable<Envelope<T>> {
        let request = ApiRequest::get(self.path("{id}")).path_param("id", id);
        self.ctx.dispatch(request, self.labels.fetched, 200)
    }

    pub fn create(&self, record: &T) -> Observable<Envelope<T>> {
        let request = ApiRequest::post(self.base).json(record);
        self.ctx.dispatch(request, self.labels.created, 201)
    }

    pub fn update(&self, id: i64, record: &T) -> Observable<Envelope<T>> {
        let request = ApiRequest::put(self.path("{id}"))
            .path_param("id", id)
            .json(record);
        self.ctx.dispatch(request, self.labels.updated, 200)
    }

    pub fn delete(&self, id: i64) -> Observable<Envelope<Void>> {
        let request = ApiRequest::delete(self.path("{id}")).path_param("id", id);
        self.ctx.dispatch(request, self.labels.deleted, 200)
    }

    /// `GET {base}/search?q=...`, for the resources whose backend routes it.
    ///
    /// Offline wins over a blank query; a blank query online settles with a 400 without
    /// any request.
    pub(crate) fn search_with(&self, query: &str, found: &'static str) -> Observable<Envelope<Vec<T>>> {
        if !self.ctx.is_online() {
            return settled(Envelope::offline());
        }
        let query = query.trim();
        if query.is_empty() {
            return settled(Envelope::failure(
                SEARCH_TERM_REQUIRED,
                ErrorKind::BadRequest.code(),
            ));
        }
        let request = ApiRequest::get(self.path("search")).query("q", query);
        self.ctx.dispatch(request, found, 200)
    }

    pub fn set_status(&self, id: i64, status: &str) -> Observable<Envelope<T>> {
        let request = ApiRequest::patch(self.path("{id}/status"))
            .path_param("id", id)
            .json(&StatusChange {
                status: status.to_string(),
            });
        self.ctx.dispatch(request, self.labels.status_changed, 200)
    }
}
