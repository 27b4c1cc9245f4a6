mod api;
mod dot;
mod language;
