mod errors;
mod fragments;
mod processors;
mod testkit;
