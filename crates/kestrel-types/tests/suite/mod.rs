mod generic_calls;
