use super::{RepoContext, ResourceLabels, ResourceRepository};
use crate::client::ApiRequest;
use crate::envelope::Envelope;
use crate::models::Category;
use crate::observable::Observable;

pub type CategoryRepository = ResourceRepository<Category>;

const FOUND: &str = "Categorías encontradas";

pub(crate) static LABELS: ResourceLabels = ResourceLabels {
    listed: "Categorías obtenidas exitosamente",
    fetched: "Categoría obtenida exitosamente",
    created: "Categoría creada exitosamente",
    updated: "Categoría actualizada exitosamente",
    deleted: "Categoría eliminada exitosamente",
    status_changed: "Estado de la categoría actualizado exitosamente",
};

impl ResourceRepository<Category> {
    pub(crate) fn bind(ctx: RepoContext) -> Self {
        Self::new(ctx, "categories", &LABELS)
    }

    pub fn search(&self, query: &str) -> Observable<Envelope<Vec<Category>>> {
        self.search_with(query, FOUND)
    }

    /// Root categories with `children` populated.
    pub fn tree(&self) -> Observable<Envelope<Vec<Category>>> {
        self.ctx.dispatch(
            ApiRequest::get(self.path("tree")),
            "Árbol de categorías obtenido exitosamente",
            200,
        )
    }

    pub fn active(&self) -> Observable<Envelope<Vec<Category>>> {
        self.ctx.dispatch(
            ApiRequest::get(self.path("active")),
            "Categorías activas obtenidas exitosamente",
            200,
        )
    }
}
