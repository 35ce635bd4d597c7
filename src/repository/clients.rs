use super::{RepoContext, ResourceLabels, ResourceRepository};
use crate::client::ApiRequest;
use crate::envelope::Envelope;
use crate::models::{Client, CreditLimitUpdate, Quote};
use crate::observable::Observable;
use serde_json::Value;

pub type ClientRepository = ResourceRepository<Client>;

pub(crate) static LABELS: ResourceLabels = ResourceLabels {
    listed: "Clientes obtenidos exitosamente",
    fetched: "Cliente obtenido exitosamente",
    created: "Cliente creado exitosamente",
    updated: "Cliente actualizado exitosamente",
    deleted: "Cliente eliminado exitosamente",
    status_changed: "Status del cliente actualizado exitosamente",
};

impl ResourceRepository<Client> {
    pub(crate) fn bind(ctx: RepoContext) -> Self {
        Self::new(ctx, "clients", &LABELS)
    }

    pub fn active(&self) -> Observable<Envelope<Vec<Client>>> {
        self.ctx.dispatch(
            ApiRequest::get(self.path("active")),
            "Clientes activos obtenidos exitosamente",
            200,
        )
    }

    /// `client_type` is `individual` or `business`.
    pub fn by_type(&self, client_type: &str) -> Observable<Envelope<Vec<Client>>> {
        let request = ApiRequest::get(self.path("type/{type}")).path_param("type", client_type);
        self.ctx.dispatch(
            request,
            format!("Clientes de tipo {} obtenidos exitosamente", client_type),
            200,
        )
    }

    pub fn by_document(&self, document_number: &str) -> Observable<Envelope<Client>> {
        let request = ApiRequest::get(self.path("document/{number}"))
            .path_param("number", document_number);
        self.ctx.dispatch(request, "Cliente encontrado", 200)
    }

    /// Quotes issued to the client.
    pub fn quotes(&self, client_id: i64) -> Observable<Envelope<Vec<Quote>>> {
        let request = ApiRequest::get("quotes/client/{id}").path_param("id", client_id);
        self.ctx
            .dispatch(request, "Cotizaciones del cliente obtenidas exitosamente", 200)
    }

    pub fn stats(&self) -> Observable<Envelope<Value>> {
        self.ctx.dispatch(
            ApiRequest::get(self.path("stats")),
            "Estadísticas obtenidas exitosamente",
            200,
        )
    }

    pub fn update_credit_limit(&self, id: i64, credit_limit: f64) -> Observable<Envelope<Client>> {
        let request = ApiRequest::patch(self.path("{id}/credit-limit"))
            .path_param("id", id)
            .json(&CreditLimitUpdate { credit_limit });
        self.ctx
            .dispatch(request, "Límite de crédito actualizado exitosamente", 200)
    }
}
