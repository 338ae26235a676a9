use crate::server::{
    data::member_xp::MemberXpRepository,
    error::AppError,
    model::member_xp::XpGrant,
    plugin::leveling::formula::{level_for_xp, MAX_XP},
};
use sea_orm::TransactionTrait;
use test_utils::{builder::TestBuilder, factory};

mod apply_grant;
mod delete;
mod replace_guild;
mod set_xp;
