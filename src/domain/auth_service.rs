//! Login, logout and company registration.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::auth::{LoginCommand, LoginResult, RegisterCommand, RegisterResult};
use crate::domain::error::{BackofficeError, Result};
use crate::domain::models::{Company, Session};
use crate::domain::tenant::{strip_non_digits, TenantKey};
use crate::storage::traits::{AuthStore, UserUpsert};
use crate::storage::SessionStore;

/// Authentication flow. Credential verification happens in the store's
/// procedures; this service owns the session and credential-slot bookkeeping
/// around it.
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthStore>,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthStore>, sessions: SessionStore) -> Self {
        Self { auth, sessions }
    }

    /// Verify the credential pair against the tenant and, on success,
    /// replace the active session wholesale and honor the remember-me
    /// choice for that tenant's slot.
    pub fn login(&self, command: LoginCommand) -> Result<LoginResult> {
        if command.tenant.is_empty() {
            return Err(BackofficeError::InvalidInput(
                "CNPJ não informado na URL".to_string(),
            ));
        }

        let login_digits = strip_non_digits(&command.login);
        info!("verifying user {} at tenant {}", login_digits, command.tenant);

        let user = self
            .auth
            .verify_user(&command.tenant, &login_digits, &command.secret)?
            .ok_or_else(|| {
                warn!("credential rejected for tenant {}", command.tenant);
                BackofficeError::InvalidCredentials
            })?;

        let session = Session {
            user_id: user.id,
            tenant: user.cnpj,
            display_name: user.display_name,
            role: user.role,
            permissions: user.permissions,
            logged_at: Utc::now(),
        };
        self.sessions.set_active_session(&session)?;

        if command.remember {
            self.sessions
                .set_remembered_credential(&command.tenant, &login_digits, &command.secret)?;
        } else {
            self.sessions.clear_remembered_credential(&command.tenant)?;
        }

        info!(
            "user {} logged into tenant {}",
            session.display_name, session.tenant
        );
        Ok(LoginResult { session })
    }

    /// Drop the active session. Remembered credentials are untouched; they
    /// are an auto-fill convenience, not an auto-login.
    pub fn logout(&self) -> Result<()> {
        self.sessions.clear_active_session()?;
        info!("session cleared");
        Ok(())
    }

    /// Register a company and its administrator through the two upsert
    /// procedures. Both records carry the web origin tag so the desktop
    /// client can tell them apart when synchronizing.
    pub fn register(&self, command: RegisterCommand) -> Result<RegisterResult> {
        let tenant = TenantKey::normalize(&command.cnpj);
        if !tenant.is_complete() {
            return Err(BackofficeError::InvalidInput(
                "CNPJ deve ter 14 dígitos".to_string(),
            ));
        }
        if command.legal_name.trim().is_empty() {
            return Err(BackofficeError::InvalidInput(
                "Informe a razão social".to_string(),
            ));
        }
        if command.password != command.password_confirmation {
            return Err(BackofficeError::InvalidInput(
                "As senhas não conferem".to_string(),
            ));
        }
        let admin_cpf = strip_non_digits(&command.admin_cpf);
        if admin_cpf.is_empty() || command.admin_name.trim().is_empty() {
            return Err(BackofficeError::InvalidInput(
                "Informe o nome e o CPF do administrador".to_string(),
            ));
        }

        let optional = |value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        let company = Company {
            cnpj: tenant.clone(),
            legal_name: command.legal_name.trim().to_uppercase(),
            trade_name: optional(&command.trade_name).map(|v| v.to_uppercase()),
            city: optional(&command.city).map(|v| v.to_uppercase()),
            state: optional(&command.state).map(|v| v.to_uppercase()),
            phone: optional(&command.phone),
            email: optional(&command.email),
            origin: "web".to_string(),
        };
        self.auth.upsert_company(&company)?;

        self.auth.upsert_user(&UserUpsert {
            cnpj: tenant.clone(),
            login: admin_cpf.clone(),
            name: command.admin_name.trim().to_uppercase(),
            secret: command.password,
            role: "admin".to_string(),
            email: optional(&command.email),
            origin: "web".to_string(),
            cpf: admin_cpf,
        })?;

        info!("registered company {} with admin user", tenant);
        Ok(RegisterResult { tenant })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CompanyStore, MemoryKeyValueStore, MemoryStore};

    fn setup() -> (AuthService, Arc<MemoryStore>, SessionStore) {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        let auth = AuthService::new(store.clone(), sessions.clone());
        (auth, store, sessions)
    }

    fn register_command() -> RegisterCommand {
        RegisterCommand {
            cnpj: "12.345.678/0001-95".to_string(),
            legal_name: "Mercado Litoral Ltda".to_string(),
            trade_name: "Mercado do Litoral".to_string(),
            city: "Torres".to_string(),
            state: "rs".to_string(),
            phone: "(51) 99999-0000".to_string(),
            email: "contato@mercado.com".to_string(),
            admin_name: "Maria Silva".to_string(),
            admin_cpf: "123.456.789-01".to_string(),
            password: "senha123".to_string(),
            password_confirmation: "senha123".to_string(),
        }
    }

    #[test]
    fn register_then_login() {
        let (auth, store, sessions) = setup();
        let result = auth.register(register_command()).unwrap();
        assert_eq!(result.tenant.as_str(), "12345678000195");

        let company = store.find_company(&result.tenant).unwrap().unwrap();
        assert_eq!(company.legal_name, "MERCADO LITORAL LTDA");
        assert_eq!(company.trade_name.as_deref(), Some("MERCADO DO LITORAL"));
        assert_eq!(company.origin, "web");

        let login = auth
            .login(LoginCommand {
                tenant: result.tenant.clone(),
                // Punctuated CPF is accepted: digits are what gets verified.
                login: "123.456.789-01".to_string(),
                secret: "senha123".to_string(),
                remember: false,
            })
            .unwrap();
        assert_eq!(login.session.display_name, "MARIA SILVA");
        assert_eq!(login.session.role, "admin");
        assert_eq!(sessions.active_session().unwrap(), login.session);
    }

    #[test]
    fn register_rejects_incomplete_cnpj_and_mismatched_passwords() {
        let (auth, _, _) = setup();

        let mut short = register_command();
        short.cnpj = "123".to_string();
        assert!(matches!(
            auth.register(short),
            Err(BackofficeError::InvalidInput(_))
        ));

        let mut mismatch = register_command();
        mismatch.password_confirmation = "outra".to_string();
        assert!(matches!(
            auth.register(mismatch),
            Err(BackofficeError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejected_credentials_leave_no_session() {
        let (auth, _, sessions) = setup();
        auth.register(register_command()).unwrap();

        let err = auth
            .login(LoginCommand {
                tenant: TenantKey::normalize("12345678000195"),
                login: "12345678901".to_string(),
                secret: "errada".to_string(),
                remember: true,
            })
            .unwrap_err();
        assert!(matches!(err, BackofficeError::InvalidCredentials));
        assert!(sessions.active_session().is_none());
    }

    #[test]
    fn login_replaces_previous_session() {
        let (auth, _, sessions) = setup();
        auth.register(register_command()).unwrap();

        let mut other = register_command();
        other.cnpj = "99.999.999/0001-99".to_string();
        other.admin_name = "Joao".to_string();
        auth.register(other).unwrap();

        let login = |cnpj: &str| {
            auth.login(LoginCommand {
                tenant: TenantKey::normalize(cnpj),
                login: "12345678901".to_string(),
                secret: "senha123".to_string(),
                remember: false,
            })
            .unwrap()
        };
        login("12345678000195");
        login("99999999000199");
        assert_eq!(
            sessions.active_session().unwrap().tenant.as_str(),
            "99999999000199"
        );
    }

    #[test]
    fn remember_choice_fills_and_clears_the_slot() {
        let (auth, _, sessions) = setup();
        auth.register(register_command()).unwrap();
        let tenant = TenantKey::normalize("12345678000195");

        auth.login(LoginCommand {
            tenant: tenant.clone(),
            login: "123.456.789-01".to_string(),
            secret: "senha123".to_string(),
            remember: true,
        })
        .unwrap();
        let saved = sessions.remembered_credential(&tenant).unwrap();
        assert_eq!(saved.login, "12345678901");
        assert_eq!(saved.secret, "senha123");

        // Declining the option on a later login clears the slot.
        auth.login(LoginCommand {
            tenant: tenant.clone(),
            login: "12345678901".to_string(),
            secret: "senha123".to_string(),
            remember: false,
        })
        .unwrap();
        assert!(sessions.remembered_credential(&tenant).is_none());
    }

    #[test]
    fn logout_clears_only_the_session() {
        let (auth, _, sessions) = setup();
        auth.register(register_command()).unwrap();
        let tenant = TenantKey::normalize("12345678000195");
        auth.login(LoginCommand {
            tenant: tenant.clone(),
            login: "12345678901".to_string(),
            secret: "senha123".to_string(),
            remember: true,
        })
        .unwrap();

        auth.logout().unwrap();
        assert!(sessions.active_session().is_none());
        assert!(sessions.remembered_credential(&tenant).is_some());
        // Logging out twice is harmless.
        auth.logout().unwrap();
    }
}
