pub mod damage_modifiers;
pub mod final_modifiers;
pub mod immunity;
pub mod intimidate;
pub mod priority;
pub mod reactions;
pub mod recovery;
pub mod stat_modifiers;
pub mod type_changers;
pub mod weather_setters;
