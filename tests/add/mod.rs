mod add_multiple_files_to_index_incrementally;
mod removing_paths_from_index;
