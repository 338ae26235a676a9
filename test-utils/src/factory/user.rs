//! Dashboard user factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builds `user` rows. Discord IDs are taken as numbers and stored as strings, the
/// same way the application stores snowflakes.
///
/// ```rust,ignore
/// let moderator = UserFactory::new(&db).discord_id(42).name("Mod").build().await?;
/// let owner = create_admin(&db, 7).await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: u64,
    name: Option<String>,
    admin: bool,
}

impl<'a> UserFactory<'a> {
    /// Non-admin user with a unique ID, named after that ID unless overridden.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            discord_id: next_id(),
            name: None,
            admin: false,
        }
    }

    pub fn discord_id(mut self, discord_id: u64) -> Self {
        self.discord_id = discord_id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let name = self
            .name
            .unwrap_or_else(|| format!("member-{}", self.discord_id));

        entity::user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id.to_string()),
            name: ActiveValue::Set(name),
            admin: ActiveValue::Set(self.admin),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Site admin with the given Discord ID.
pub async fn create_admin(
    db: &DatabaseConnection,
    discord_id: u64,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).discord_id(discord_id).admin().build().await
}
