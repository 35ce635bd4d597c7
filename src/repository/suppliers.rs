use super::{RepoContext, ResourceLabels, ResourceRepository};
use crate::client::ApiRequest;
use crate::envelope::Envelope;
use crate::models::Supplier;
use crate::observable::Observable;

pub type SupplierRepository = ResourceRepository<Supplier>;

const FOUND: &str = "Proveedores encontrados";

pub(crate) static LABELS: ResourceLabels = ResourceLabels {
    listed: "Proveedores obtenidos exitosamente",
    fetched: "Proveedor obtenido exitosamente",
    created: "Proveedor creado exitosamente",
    updated: "Proveedor actualizado exitosamente",
    deleted: "Proveedor eliminado exitosamente",
    status_changed: "Estado del proveedor actualizado exitosamente",
};

impl ResourceRepository<Supplier> {
    pub(crate) fn bind(ctx: RepoContext) -> Self {
        Self::new(ctx, "suppliers", &LABELS)
    }

    pub fn search(&self, query: &str) -> Observable<Envelope<Vec<Supplier>>> {
        self.search_with(query, FOUND)
    }

    pub fn active(&self) -> Observable<Envelope<Vec<Supplier>>> {
        self.ctx.dispatch(
            ApiRequest::get(self.path("active")),
            "Proveedores activos obtenidos exitosamente",
            200,
        )
    }
}
