mod conversion_tests;
