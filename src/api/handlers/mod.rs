pub mod cases;
pub mod executive;
pub mod health;
pub mod history;
pub mod prefill;
pub mod template;
pub mod typify;
