pub mod items;
pub mod pokemons;
pub mod trainers;
