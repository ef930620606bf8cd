//! Cross-module scenario tests

mod game_scenarios;
