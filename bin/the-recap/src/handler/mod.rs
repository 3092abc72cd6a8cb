pub mod end_of_game;
pub mod gate;
