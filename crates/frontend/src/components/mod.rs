pub mod city_list;
pub mod detail_panel;
pub mod map_view;
