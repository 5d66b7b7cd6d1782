use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::venue_genre::Entity")]
    VenueGenres,
    #[sea_orm(has_many = "super::artist_genre::Entity")]
    ArtistGenres,
}

impl Related<super::venue::Entity> for Entity {
    fn to() -> RelationDef {
        super::venue_genre::Relation::Venue.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::venue_genre::Relation::Genre.def().rev())
    }
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        super::artist_genre::Relation::Artist.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::artist_genre::Relation::Genre.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
