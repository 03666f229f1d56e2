use crate::domain::errors::{DomainError, FieldError};
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};
use crate::infrastructure::password::{hash_password, verify_password};
use crate::infrastructure::sessions::SessionStore;

pub const ADMIN_USERNAME: &str = "admin";

/// A user together with the session token that now identifies them.
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub user: User,
    pub token: String,
}

pub struct AuthService<R> {
    repo: R,
    sessions: SessionStore,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: R, sessions: SessionStore) -> Self {
        Self { repo, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Creates a regular account and logs it in.
    pub fn register(&self, username: &str, password: &str) -> Result<LoggedIn, DomainError> {
        let mut errors = Vec::new();
        if username.trim().is_empty() {
            errors.push(FieldError::new("username", "is required"));
        }
        if password.is_empty() {
            errors.push(FieldError::new("password", "is required"));
        }
        DomainError::check("Username and password are required", errors)?;

        if self.repo.find_by_username(username)?.is_some() {
            return Err(DomainError::InvalidInput("Username already exists".to_string()));
        }

        let user = self.repo.create(NewUser {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            is_admin: false,
        })?;
        log::info!("Registered user {} ({})", user.id, user.username);

        let token = self.sessions.start(user.id)?;
        Ok(LoggedIn { user, token })
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoggedIn, DomainError> {
        let user = match self.repo.find_by_username(username)? {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                log::warn!("Failed login attempt for '{}'", username);
                return Err(DomainError::InvalidCredentials);
            }
        };
        let token = self.sessions.start(user.id)?;
        Ok(LoggedIn { user, token })
    }

    pub fn logout(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.end(token)?;
        Ok(())
    }

    /// The user behind a session token, if the session is still live.
    pub fn current_user(&self, token: &str) -> Result<Option<User>, DomainError> {
        match self.sessions.user_id(token)? {
            Some(id) => self.repo.find_by_id(id),
            None => Ok(None),
        }
    }

    /// Creates the `admin` account unless it already exists.
    pub fn ensure_admin(&self, password: &str) -> Result<User, DomainError> {
        if let Some(existing) = self.repo.find_by_username(ADMIN_USERNAME)? {
            log::info!("Admin user already seeded");
            return Ok(existing);
        }
        let admin = self.repo.create(NewUser {
            username: ADMIN_USERNAME.to_string(),
            password_hash: hash_password(password)?,
            is_admin: true,
        })?;
        log::info!("Seeded admin user {}", admin.id);
        Ok(admin)
    }
}
