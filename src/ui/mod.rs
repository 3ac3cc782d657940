/// UI shell: sidebar/top-bar widgets, charts, and the drill-through table.
pub mod charts;
pub mod panels;
pub mod table;
