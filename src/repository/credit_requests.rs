use super::{RepoContext, ResourceLabels, ResourceRepository};
use crate::client::ApiRequest;
use crate::envelope::Envelope;
use crate::models::{CreditApproval, CreditRejection, CreditRequest};
use crate::observable::Observable;

pub type CreditRequestRepository = ResourceRepository<CreditRequest>;

pub(crate) static LABELS: ResourceLabels = ResourceLabels {
    listed: "Solicitudes de crédito obtenidas exitosamente",
    fetched: "Solicitud de crédito obtenida exitosamente",
    created: "Solicitud de crédito creada exitosamente",
    updated: "Solicitud de crédito actualizada exitosamente",
    deleted: "Solicitud de crédito eliminada exitosamente",
    status_changed: "Estado de la solicitud actualizado exitosamente",
};

impl ResourceRepository<CreditRequest> {
    pub(crate) fn bind(ctx: RepoContext) -> Self {
        Self::new(ctx, "credit-requests", &LABELS)
    }

    pub fn by_client(&self, client_id: i64) -> Observable<Envelope<Vec<CreditRequest>>> {
        let request = ApiRequest::get(self.path("client/{id}")).path_param("id", client_id);
        self.ctx.dispatch(request, LABELS.listed, 200)
    }

    pub fn approve(&self, id: i64, approval: &CreditApproval) -> Observable<Envelope<CreditRequest>> {
        let request = ApiRequest::patch(self.path("{id}/approve"))
            .path_param("id", id)
            .json(approval);
        self.ctx
            .dispatch(request, "Solicitud de crédito aprobada exitosamente", 200)
    }

    /// Only `pending` and `under_review` requests can be rejected; the server answers 400
    /// otherwise.
    pub fn reject(&self, id: i64, rejection: &CreditRejection) -> Observable<Envelope<CreditRequest>> {
        let request = ApiRequest::patch(self.path("{id}/reject"))
            .path_param("id", id)
            .json(rejection);
        self.ctx
            .dispatch(request, "Solicitud de crédito rechazada", 200)
    }
}
