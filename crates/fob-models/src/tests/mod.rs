mod property_tests;
