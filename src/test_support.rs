use crate::options::ChainOptions;
use crate::tables::{LanguageTable, Region, RegionTable};
use std::sync::Arc;

pub(crate) fn options() -> Arc<ChainOptions> {
    Arc::new(ChainOptions::default())
}

pub(crate) fn languages() -> Arc<LanguageTable> {
    Arc::new(LanguageTable::new(["en-US", "de", "fr", "pt-BR", "es", "pl"]))
}

pub(crate) fn regions() -> Arc<RegionTable> {
    Arc::new(
        RegionTable::new(
            Region::worldwide("en-US"),
            [
                Region::new("us", "us", "en-US", 1),
                Region::new("br", "br", "pt-BR", 2),
                Region::new("es", "es", "es", 3),
                Region::new("pl", "pl", "pl", 4),
            ],
        )
        .expect("valid fixture regions"),
    )
}

/// Same as [`regions`] without a region whose default language is `en-US`.
pub(crate) fn regions_without_us() -> Arc<RegionTable> {
    Arc::new(
        RegionTable::new(
            Region::worldwide("en-US"),
            [
                Region::new("br", "br", "pt-BR", 1),
                Region::new("es", "es", "es", 2),
                Region::new("pl", "pl", "pl", 3),
            ],
        )
        .expect("valid fixture regions"),
    )
}
