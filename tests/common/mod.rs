pub mod synthetic_tab;
