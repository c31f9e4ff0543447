mod commit_tree_creates_commit_and_moves_branch;
mod write_tree_and_list_it;
