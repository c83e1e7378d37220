fn main() { symtoep_tasks::entry_points::project(); }
