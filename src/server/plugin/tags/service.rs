use sea_orm::DatabaseConnection;

use crate::{
    model::tags::{TagKind, TagSettings},
    server::{
        data::member_tag::MemberTagRepository,
        error::AppError,
        model::member_tag::MemberTags,
        plugin::tags::normalize::{merge_tags, normalize_tags, without_tags},
        service::settings::{PluginSettings, SettingsService},
    },
};

impl PluginSettings for TagSettings {
    const PLUGIN: &'static str = "tags";

    fn validate(&self) -> Result<(), AppError> {
        if self.max_per_member == 0 {
            return Err(AppError::BadRequest(
                "Members must be allowed at least one tag".to_string(),
            ));
        }

        Ok(())
    }
}

fn tags_of(member: &MemberTags, kind: TagKind) -> &Vec<String> {
    match kind {
        TagKind::Genre => &member.genres,
        TagKind::Daw => &member.daws,
    }
}

fn tags_of_mut(member: &mut MemberTags, kind: TagKind) -> &mut Vec<String> {
    match kind {
        TagKind::Genre => &mut member.genres,
        TagKind::Daw => &mut member.daws,
    }
}

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a member's tags; untagged members get empty lists.
    pub async fn get_member(&self, guild_id: u64, user_id: u64) -> Result<MemberTags, AppError> {
        let tags = MemberTagRepository::new(self.db)
            .find(guild_id, user_id)
            .await?
            .unwrap_or_else(|| MemberTags::empty(guild_id, user_id));

        Ok(tags)
    }

    pub async fn get_all(&self, guild_id: u64) -> Result<Vec<MemberTags>, AppError> {
        MemberTagRepository::new(self.db)
            .get_all_by_guild(guild_id)
            .await
    }

    /// Replaces a member's tags after normalizing them against the guild settings.
    pub async fn set_member(
        &self,
        guild_id: u64,
        user_id: u64,
        genres: Vec<String>,
        daws: Vec<String>,
    ) -> Result<MemberTags, AppError> {
        let settings: TagSettings = SettingsService::new(self.db).load(guild_id).await?;

        let genres = normalize_tags(
            TagKind::Genre,
            &genres,
            &settings.genres,
            settings.max_per_member,
        )?;
        let daws = normalize_tags(TagKind::Daw, &daws, &settings.daws, settings.max_per_member)?;

        MemberTagRepository::new(self.db)
            .save(MemberTags {
                genres,
                daws,
                ..MemberTags::empty(guild_id, user_id)
            })
            .await
    }

    /// Appends values to one of a member's lists.
    ///
    /// Only the new values are checked against the allow-list. Tags the member
    /// already holds stay even if the settings no longer allow them.
    pub async fn add_tags(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: TagKind,
        values: Vec<String>,
    ) -> Result<MemberTags, AppError> {
        let settings: TagSettings = SettingsService::new(self.db).load(guild_id).await?;
        let allowed = match kind {
            TagKind::Genre => &settings.genres,
            TagKind::Daw => &settings.daws,
        };
        let added = normalize_tags(kind, &values, allowed, usize::MAX)?;

        let mut member = self.get_member(guild_id, user_id).await?;
        let merged = merge_tags(kind, tags_of(&member, kind), added, settings.max_per_member)?;
        *tags_of_mut(&mut member, kind) = merged;

        MemberTagRepository::new(self.db).save(member).await
    }

    /// Removes values from one of a member's lists, ignoring case.
    ///
    /// Removal never fails on the guild settings, so members can always shrink a
    /// list that no longer fits them.
    pub async fn remove_tags(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: TagKind,
        values: Vec<String>,
    ) -> Result<MemberTags, AppError> {
        let mut member = self.get_member(guild_id, user_id).await?;
        let kept = without_tags(tags_of(&member, kind), &values);
        *tags_of_mut(&mut member, kind) = kept;

        MemberTagRepository::new(self.db).save(member).await
    }

    /// Deletes a member's tags.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Member has no tags
    pub async fn delete_member(&self, guild_id: u64, user_id: u64) -> Result<(), AppError> {
        if !MemberTagRepository::new(self.db)
            .delete(guild_id, user_id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "Member {} has no tags in guild {}",
                user_id, guild_id
            )));
        }

        Ok(())
    }

    /// Finds members carrying a tag, ignoring case.
    pub async fn search(
        &self,
        guild_id: u64,
        kind: TagKind,
        value: &str,
    ) -> Result<Vec<MemberTags>, AppError> {
        let needle = value.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::BadRequest("Search value is empty".to_string()));
        }

        let members = self
            .get_all(guild_id)
            .await?
            .into_iter()
            .filter(|member| {
                tags_of(member, kind)
                    .iter()
                    .any(|tag| tag.to_lowercase() == needle)
            })
            .collect();

        Ok(members)
    }
}
