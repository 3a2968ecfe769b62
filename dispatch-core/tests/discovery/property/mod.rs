mod generated_assignment;
