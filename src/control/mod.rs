pub mod mass_search;

pub use mass_search::{find_helium_mass, MassSearch, SearchResult};
