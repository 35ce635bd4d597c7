use super::{RepoContext, ResourceLabels, ResourceRepository};
use crate::client::ApiRequest;
use crate::envelope::Envelope;
use crate::models::{Product, StockUpdate};
use crate::observable::Observable;

pub type ProductRepository = ResourceRepository<Product>;

const FOUND: &str = "Productos encontrados";

pub(crate) static LABELS: ResourceLabels = ResourceLabels {
    listed: "Productos obtenidos exitosamente",
    fetched: "Producto obtenido exitosamente",
    created: "Producto creado exitosamente",
    updated: "Producto actualizado exitosamente",
    deleted: "Producto eliminado exitosamente",
    status_changed: "Estado del producto actualizado exitosamente",
};

impl ResourceRepository<Product> {
    pub(crate) fn bind(ctx: RepoContext) -> Self {
        Self::new(ctx, "products", &LABELS)
    }

    pub fn search(&self, query: &str) -> Observable<Envelope<Vec<Product>>> {
        self.search_with(query, FOUND)
    }

    pub fn by_category(&self, category_id: i64) -> Observable<Envelope<Vec<Product>>> {
        let request =
            ApiRequest::get(self.path("byCategory/{id}")).path_param("id", category_id);
        self.ctx.dispatch(request, LABELS.listed, 200)
    }

    pub fn low_stock(&self) -> Observable<Envelope<Vec<Product>>> {
        self.ctx.dispatch(
            ApiRequest::get(self.path("lowStock")),
            "Productos con stock bajo obtenidos exitosamente",
            200,
        )
    }

    pub fn update_stock(&self, id: i64, stock: i64) -> Observable<Envelope<Product>> {
        let request = ApiRequest::patch(self.path("{id}/stock"))
            .path_param("id", id)
            .json(&StockUpdate { stock });
        self.ctx.dispatch(request, "Stock actualizado exitosamente", 200)
    }
}
