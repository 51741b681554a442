//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for blogly_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            image: model.image,
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel, for updates.
impl From<blogly_core::domain::User> for ActiveModel {
    fn from(user: blogly_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            image: Set(user.image),
        }
    }
}

/// Conversion from a not-yet-stored user; the id is generated on insert.
impl From<blogly_core::domain::NewUser> for ActiveModel {
    fn from(user: blogly_core::domain::NewUser) -> Self {
        Self {
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            image: Set(user.image),
            ..Default::default()
        }
    }
}
