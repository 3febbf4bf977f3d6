mod lookup;

pub use lookup::LookupResult;
