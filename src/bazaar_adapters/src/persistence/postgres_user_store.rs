use bazaar_core::{
    DuplicateField, Email, PasswordHash, PasswordReset, Phone, Profile, ResetToken, Role, User,
    UserChanges, UserId, UserStore, UserStoreError,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Key for the transaction-scoped advisory lock taken by the first-admin
/// bootstrap.
const FIRST_ADMIN_LOCK_KEY: i64 = 0x6261_7a61_6172;

const USER_COLUMNS: &str = "id, email, phone, password_hash, role, first_name, last_name, \
     username, profile_image, is_active, password_reset_token, password_reset_expires, \
     created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    phone: String,
    password_hash: String,
    role: String,
    first_name: String,
    last_name: String,
    username: Option<String>,
    profile_image: Option<String>,
    is_active: bool,
    password_reset_token: Option<String>,
    password_reset_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let unexpected = |e: bazaar_core::UserError| UserStoreError::UnexpectedError(e.to_string());

        let password_reset = match (row.password_reset_token, row.password_reset_expires) {
            (Some(token), Some(expires_at)) => Some(PasswordReset {
                token: ResetToken::parse(Secret::new(token)).map_err(unexpected)?,
                expires_at,
            }),
            _ => None,
        };

        Ok(User {
            id: UserId::from(row.id),
            email: Email::parse(Secret::new(row.email)).map_err(unexpected)?,
            phone: Phone::parse(row.phone).map_err(unexpected)?,
            password_hash: PasswordHash::new(Secret::new(row.password_hash)),
            role: row.role.parse::<Role>().map_err(unexpected)?,
            profile: Profile {
                first_name: row.first_name,
                last_name: row.last_name,
                username: row.username,
                profile_image: row.profile_image,
                is_active: row.is_active,
            },
            password_reset,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Maps unique violations to `UserAlreadyExists` naming the column, and
/// everything else to `UnexpectedError`.
fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_email_key") => {
                    return UserStoreError::UserAlreadyExists(DuplicateField::Email);
                }
                Some("users_phone_key") => {
                    return UserStoreError::UserAlreadyExists(DuplicateField::Phone);
                }
                _ => {}
            }
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

async fn insert_user<'e, E>(executor: E, user: &User) -> Result<(), UserStoreError>
where
    E: sqlx::PgExecutor<'e>,
{
    let (reset_token, reset_expires) = match &user.password_reset {
        Some(reset) => (
            Some(reset.token.as_ref().expose_secret().clone()),
            Some(reset.expires_at),
        ),
        None => (None, None),
    };

    sqlx::query(
        r#"
            INSERT INTO users (id, email, phone, password_hash, role, first_name, last_name,
                               username, profile_image, is_active, password_reset_token,
                               password_reset_expires, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(user.id.as_uuid())
    .bind(user.email.as_ref().expose_secret())
    .bind(user.phone.as_str())
    .bind(user.password_hash.as_ref().expose_secret())
    .bind(user.role.as_str())
    .bind(&user.profile.first_name)
    .bind(&user.profile.last_name)
    .bind(&user.profile.username)
    .bind(&user.profile.profile_image)
    .bind(user.profile.is_active)
    .bind(reset_token)
    .bind(reset_expires)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(executor)
    .await
    .map_err(map_write_error)?;

    Ok(())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        insert_user(&self.pool, &user).await
    }

    #[tracing::instrument(name = "Bootstrapping first admin in PostgreSQL", skip_all)]
    async fn add_first_admin(&self, mut user: User) -> Result<(), UserStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(FIRST_ADMIN_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
            .fetch_one(&mut *tx)
            .await
            .map_err(unexpected)?;
        if admins > 0 {
            return Err(UserStoreError::AdminAlreadyExists);
        }

        user.role = Role::Admin;
        insert_user(&mut *tx, &user).await?;

        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Finding user by email in PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email.as_ref().expose_secret())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Finding user by phone in PostgreSQL", skip_all)]
    async fn find_by_phone(&self, phone: &Phone) -> Result<Option<User>, UserStoreError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE phone = $1"))
                .bind(phone.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Finding user by reset token in PostgreSQL", skip_all)]
    async fn find_by_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE password_reset_token = $1 AND password_reset_expires > $2"
        ))
        .bind(token.as_ref().expose_secret())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Listing users in PostgreSQL", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
                .fetch_all(&self.pool)
                .await
                .map_err(unexpected)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[tracing::instrument(name = "Counting users in PostgreSQL", skip_all)]
    async fn count_users(&self) -> Result<u64, UserStoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(count as u64)
    }

    #[tracing::instrument(name = "Counting users by role in PostgreSQL", skip(self))]
    async fn count_by_role(&self, role: Role) -> Result<u64, UserStoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(count as u64)
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip(self, changes))]
    async fn update_user(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<User, UserStoreError> {
        // NULL binds keep the stored column.
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET \
             email = COALESCE($2, email), \
             phone = COALESCE($3, phone), \
             password_hash = COALESCE($4, password_hash), \
             first_name = COALESCE($5, first_name), \
             last_name = COALESCE($6, last_name), \
             username = COALESCE($7, username), \
             profile_image = COALESCE($8, profile_image), \
             is_active = COALESCE($9, is_active), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(changes.email.as_ref().map(|email| email.as_ref().expose_secret()))
        .bind(changes.phone.as_ref().map(Phone::as_str))
        .bind(
            changes
                .password_hash
                .as_ref()
                .map(|hash| hash.as_ref().expose_secret()),
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.username)
        .bind(&changes.profile_image)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Storing reset token in PostgreSQL", skip(self, reset))]
    async fn set_password_reset(
        &self,
        id: &UserId,
        reset: PasswordReset,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_reset_token = $2, password_reset_expires = $3, updated_at = NOW()
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(reset.token.as_ref().expose_secret())
        .bind(reset.expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Consuming reset token in PostgreSQL", skip_all)]
    async fn consume_reset_token(
        &self,
        token: &ResetToken,
        now: DateTime<Utc>,
        password_hash: PasswordHash,
    ) -> Result<Option<User>, UserStoreError> {
        // One statement: the row lock makes a racing consumer re-check the
        // cleared token and match nothing.
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET password_hash = $3, password_reset_token = NULL, \
             password_reset_expires = NULL, updated_at = NOW() \
             WHERE password_reset_token = $1 AND password_reset_expires > $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(token.as_ref().expose_secret())
        .bind(now)
        .bind(password_hash.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Promoting user in PostgreSQL", skip(self))]
    async fn promote(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET role = 'admin', \
             updated_at = CASE WHEN role = 'admin' THEN updated_at ELSE NOW() END \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Demoting admin in PostgreSQL", skip(self))]
    async fn demote_admin(&self, id: &UserId) -> Result<User, UserStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        // Row locks on every admin serialize concurrent demotions; a waiter
        // re-reads the rows and no longer counts one that was demoted.
        let admins: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE role = 'admin' FOR UPDATE")
                .fetch_all(&mut *tx)
                .await
                .map_err(unexpected)?;

        let target: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;
        let target: User = target.ok_or(UserStoreError::UserNotFound)?.try_into()?;

        if !target.is_admin() {
            return Ok(target);
        }
        if admins.len() <= 1 {
            return Err(UserStoreError::LastAdmin);
        }

        let row: UserRow = sqlx::query_as(&format!(
            "UPDATE users SET role = 'customer', updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        row.try_into()
    }

    #[tracing::instrument(name = "Delete user from PostgreSQL", skip(self))]
    async fn delete_user(&self, id: &UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role <> 'admin'")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        if exists {
            Err(UserStoreError::ProtectedAdmin)
        } else {
            Err(UserStoreError::UserNotFound)
        }
    }
}
