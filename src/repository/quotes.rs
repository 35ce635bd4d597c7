use super::{RepoContext, ResourceLabels, ResourceRepository};
use crate::client::ApiRequest;
use crate::envelope::Envelope;
use crate::models::{Quote, QuoteItem};
use crate::observable::Observable;

pub type QuoteRepository = ResourceRepository<Quote>;

pub(crate) static LABELS: ResourceLabels = ResourceLabels {
    listed: "Cotizaciones obtenidas exitosamente",
    fetched: "Cotización obtenida exitosamente",
    created: "Cotización creada exitosamente",
    updated: "Cotización actualizada exitosamente",
    deleted: "Cotización eliminada exitosamente",
    status_changed: "Estado de la cotización actualizado exitosamente",
};

impl ResourceRepository<Quote> {
    pub(crate) fn bind(ctx: RepoContext) -> Self {
        Self::new(ctx, "quotes", &LABELS)
    }

    pub fn by_client(&self, client_id: i64) -> Observable<Envelope<Vec<Quote>>> {
        let request = ApiRequest::get(self.path("client/{id}")).path_param("id", client_id);
        self.ctx
            .dispatch(request, "Cotizaciones del cliente obtenidas exitosamente", 200)
    }

    pub fn by_status(&self, status: &str) -> Observable<Envelope<Vec<Quote>>> {
        let request = ApiRequest::get(self.path("status/{status}")).path_param("status", status);
        self.ctx.dispatch(request, LABELS.listed, 200)
    }

    /// The quote with its line items populated.
    pub fn items(&self, id: i64) -> Observable<Envelope<Quote>> {
        let request = ApiRequest::get(self.path("{id}/items")).path_param("id", id);
        self.ctx.dispatch(request, LABELS.fetched, 200)
    }

    pub fn add_item(&self, id: i64, item: &QuoteItem) -> Observable<Envelope<QuoteItem>> {
        let request = ApiRequest::post(self.path("{id}/items"))
            .path_param("id", id)
            .json(item);
        self.ctx
            .dispatch(request, "Item agregado a la cotización exitosamente", 201)
    }

    /// Asks the server to recompute subtotal, tax and total from the items.
    pub fn recalculate(&self, id: i64) -> Observable<Envelope<Quote>> {
        let request = ApiRequest::patch(self.path("{id}/recalculate")).path_param("id", id);
        self.ctx
            .dispatch(request, "Totales de la cotización recalculados", 200)
    }
}
