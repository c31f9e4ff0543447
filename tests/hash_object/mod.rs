mod hash_blob_without_writing;
mod write_blob_object_successfully;
