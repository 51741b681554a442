use sea_orm_migration::sea_orm::DbBackend;
use sea_orm_migration::{prelude::*, schema::*};

use super::m20240101_000002_create_posts_table::Posts;
use super::m20240101_000003_create_tags_table::Tags;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostsTags::Table)
                    .col(integer(PostsTags::PostId))
                    .col(integer(PostsTags::TagId))
                    .primary_key(
                        Index::create()
                            .col(PostsTags::PostId)
                            .col(PostsTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-posts_tags-post_id")
                            .from(PostsTags::Table, PostsTags::PostId)
                            .to(Posts::Table, Posts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-posts_tags-tag_id")
                            .from(PostsTags::Table, PostsTags::TagId)
                            .to(Tags::Table, Tags::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-posts_tags-tag_id")
                    .table(PostsTags::Table)
                    .col(PostsTags::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Sqlite {
            for name in ["fk-posts_tags-post_id", "fk-posts_tags-tag_id"] {
                manager
                    .drop_foreign_key(
                        ForeignKey::drop()
                            .table(PostsTags::Table)
                            .name(name)
                            .to_owned(),
                    )
                    .await?;
            }
        }
        manager
            .drop_table(Table::drop().table(PostsTags::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PostsTags {
    Table,
    PostId,
    TagId,
}
