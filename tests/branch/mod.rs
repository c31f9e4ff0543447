mod create_branch_with_invalid_name;
