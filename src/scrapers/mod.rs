mod avito;

pub use avito::AvitoScraper;
