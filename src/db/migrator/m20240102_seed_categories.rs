use crate::entities::categories;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Reference categories shown by the browse UI.
const CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "electronics",
        "\u{1F4F1}",
        "Phones, laptops, tablets, and other electronic devices",
    ),
    (
        "accessories",
        "\u{1F453}",
        "Glasses, watches, jewelry, and personal accessories",
    ),
    (
        "bags",
        "\u{1F392}",
        "Backpacks, handbags, luggage, and wallets",
    ),
    (
        "documents",
        "\u{1F194}",
        "IDs, passports, cards, and important papers",
    ),
    (
        "jewelry",
        "\u{1F48D}",
        "Rings, necklaces, bracelets, and valuable jewelry",
    ),
    (
        "clothing",
        "\u{1F455}",
        "Jackets, shoes, hats, and clothing items",
    ),
    ("other", "\u{1F4E6}", "Other items not listed in categories"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, emoji, description) in CATEGORIES {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(Categories)
                .columns([
                    categories::Column::Name,
                    categories::Column::Emoji,
                    categories::Column::Description,
                    categories::Column::ItemCount,
                ])
                .values_panic([(*name).into(), (*emoji).into(), (*description).into(), 0.into()])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(Categories)
            .to_owned();
        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
