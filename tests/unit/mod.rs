mod battlefield_tests;
