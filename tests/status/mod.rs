mod do_not_list_empty_untracked_directories;
mod list_untracked_files_in_name_order;
mod report_staged_changes;
