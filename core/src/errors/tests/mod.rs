mod token_error_tests;
