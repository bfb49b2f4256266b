pub mod defaults {

    pub const PORT: u16 = 3000;
}

pub mod messages {

    pub const ANIME_CREATED: &str = "Anime created successfully";

    pub const ANIME_UPDATED: &str = "Anime updated successfully";

    pub const ANIME_DELETED: &str = "Anime deleted successfully";

    pub const ANIME_NOT_FOUND: &str = "Anime not found";

    pub const DUPLICATE_TITLE: &str = "An anime with this title already exists";

    pub const MISSING_REFERENCE: &str = "Referenced data does not exist";

    pub const HEALTH_OK: &str = "Anime Shelf API is running";
}
