//! Authentication: login, registration, profile and session teardown.

use super::{settled, RepoContext};
use crate::client::{ApiRequest, Outcome};
use crate::envelope::{Envelope, Void};
use crate::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest,
    TokenResponse, User,
};
use crate::observable::Observable;
use std::sync::Arc;
use tracing::info;

pub const NO_ACTIVE_SESSION: &str = "No hay sesión activa";
pub const LOGGED_OUT: &str = "Sesión cerrada exitosamente";
pub const LOGGED_OUT_LOCALLY: &str = "Sesión cerrada localmente";

#[derive(Clone)]
pub struct AuthRepository {
    ctx: RepoContext,
}

impl AuthRepository {
    pub(crate) fn new(ctx: RepoContext) -> Self {
        Self { ctx }
    }

    /// Stores the returned token in the session when the server accepts the credentials.
    pub fn login(&self, credentials: &LoginRequest) -> Observable<Envelope<LoginResponse>> {
        let session = Arc::clone(self.ctx.session());
        let request = ApiRequest::post("auth/login")
            .json(credentials)
            .unauthenticated();
        let finish = move |outcome: Outcome<LoginResponse>| match outcome {
            Outcome::Success(Some(login)) => {
                if !login.token.is_empty() {
                    session.set(login.token.clone());
                    info!("login succeeded, session stored");
                }
                Envelope::success(Some(login), "Login exitoso", 200)
            }
            other => other.into_envelope("Login exitoso", 200),
        };
        self.ctx.dispatch_with(request, finish)
    }

    pub fn register(&self, user: &RegisterRequest) -> Observable<Envelope<User>> {
        let request = ApiRequest::post("auth/register")
            .json(user)
            .unauthenticated();
        self.ctx
            .dispatch(request, "Usuario registrado exitosamente", 201)
    }

    /// The signed-in user. Without a session this settles with a 401 and sends nothing.
    pub fn profile(&self) -> Observable<Envelope<User>> {
        if !self.is_authenticated() {
            return settled(Envelope::failure(NO_ACTIVE_SESSION, 401));
        }
        self.ctx.dispatch(
            ApiRequest::get("auth/me"),
            "Perfil obtenido exitosamente",
            200,
        )
    }

    /// Ends the session. The local token is cleared whatever the server answers, and the
    /// result is always a success.
    pub fn logout(&self) -> Observable<Envelope<Void>> {
        if !self.is_authenticated() {
            return settled(Envelope::success(None, LOGGED_OUT, 200));
        }
        let session = Arc::clone(self.ctx.session());
        if !self.ctx.is_online() {
            session.clear();
            return settled(Envelope::success(None, LOGGED_OUT_LOCALLY, 200));
        }
        self.ctx
            .execute_with(ApiRequest::post("auth/logout"), move |outcome: Outcome<Void>| {
                session.clear();
                let message = if outcome.is_success() {
                    LOGGED_OUT
                } else {
                    LOGGED_OUT_LOCALLY
                };
                Envelope::success(None, message, 200)
            })
    }

    /// Exchanges a refresh token for a new access token, which replaces the current one.
    pub fn refresh_token(&self, refresh_token: &str) -> Observable<Envelope<TokenResponse>> {
        let session = Arc::clone(self.ctx.session());
        let request = ApiRequest::post("auth/refresh-token")
            .json(&RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            })
            .unauthenticated();
        let finish = move |outcome: Outcome<TokenResponse>| {
            if let Outcome::Success(Some(tokens)) = &outcome {
                if !tokens.token.is_empty() {
                    session.set(tokens.token.clone());
                }
            }
            outcome.into_envelope("Tokens renovados exitosamente", 200)
        };
        self.ctx.dispatch_with(request, finish)
    }

    pub fn change_password(&self, change: &ChangePasswordRequest) -> Observable<Envelope<Void>> {
        if !self.is_authenticated() {
            return settled(Envelope::failure(NO_ACTIVE_SESSION, 401));
        }
        let request = ApiRequest::post("auth/change-password").json(change);
        self.ctx
            .dispatch(request, "Contraseña actualizada exitosamente", 200)
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.session().is_authenticated()
    }

    pub fn current_token(&self) -> Option<String> {
        self.ctx.session().get()
    }
}
